//! Static EXIF tag-number → name dictionary.
//!
//! Mirrors EXIF 2.32 / TIFF 6.0 tag numbering. Three namespaces are kept as
//! separate tables (`Image`/IFD0, `Photo`/EXIF sub-IFD, `GPSInfo`/GPS
//! sub-IFD) the way the standard itself groups them; [`lookup_tag`] merges
//! them by first-match-wins lookup order for callers that only have a tag
//! number and no namespace context.

use phf::phf_map;

/// Which IFD a tag definition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagGroup {
    /// IFD0 — main image tags ("Image" namespace).
    Image,
    /// EXIF sub-IFD ("Photo" namespace).
    Photo,
    /// GPS sub-IFD.
    GpsInfo,
}

/// A single tag's static metadata.
#[derive(Debug, Clone, Copy)]
pub struct TagDef {
    pub name: &'static str,
    pub group: TagGroup,
}

impl TagDef {
    pub const fn new(name: &'static str, group: TagGroup) -> Self {
        TagDef { name, group }
    }
}

/// IFD0 (main image / "Image" namespace) tags.
pub static IMAGE_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x010E_u16 => TagDef::new("ImageDescription", TagGroup::Image),
    0x010F_u16 => TagDef::new("Make", TagGroup::Image),
    0x0110_u16 => TagDef::new("Model", TagGroup::Image),
    0x0112_u16 => TagDef::new("Orientation", TagGroup::Image),
    0x011A_u16 => TagDef::new("XResolution", TagGroup::Image),
    0x011B_u16 => TagDef::new("YResolution", TagGroup::Image),
    0x0128_u16 => TagDef::new("ResolutionUnit", TagGroup::Image),
    0x0131_u16 => TagDef::new("Software", TagGroup::Image),
    0x0132_u16 => TagDef::new("DateTime", TagGroup::Image),
    0x013B_u16 => TagDef::new("Artist", TagGroup::Image),
    0x013E_u16 => TagDef::new("WhitePoint", TagGroup::Image),
    0x013F_u16 => TagDef::new("PrimaryChromaticities", TagGroup::Image),
    0x0211_u16 => TagDef::new("YCbCrCoefficients", TagGroup::Image),
    0x0213_u16 => TagDef::new("YCbCrPositioning", TagGroup::Image),
    0x0214_u16 => TagDef::new("ReferenceBlackWhite", TagGroup::Image),
    0x829A_u16 => TagDef::new("ExposureTime", TagGroup::Image),
    0x8298_u16 => TagDef::new("Copyright", TagGroup::Image),
    0x8769_u16 => TagDef::new("ExifOffset", TagGroup::Image),
    0x8825_u16 => TagDef::new("GPSInfo", TagGroup::Image),
};

/// EXIF sub-IFD ("Photo" namespace) tags.
pub static PHOTO_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x829A_u16 => TagDef::new("ExposureTime", TagGroup::Photo),
    0x829D_u16 => TagDef::new("FNumber", TagGroup::Photo),
    0x8822_u16 => TagDef::new("ExposureProgram", TagGroup::Photo),
    0x8824_u16 => TagDef::new("SpectralSensitivity", TagGroup::Photo),
    0x8827_u16 => TagDef::new("ISO", TagGroup::Photo),
    0x8828_u16 => TagDef::new("OECF", TagGroup::Photo),
    0x8830_u16 => TagDef::new("SensitivityType", TagGroup::Photo),
    0x9000_u16 => TagDef::new("ExifVersion", TagGroup::Photo),
    0x9003_u16 => TagDef::new("DateTimeOriginal", TagGroup::Photo),
    0x9004_u16 => TagDef::new("CreateDate", TagGroup::Photo),
    0x9010_u16 => TagDef::new("OffsetTime", TagGroup::Photo),
    0x9011_u16 => TagDef::new("OffsetTimeOriginal", TagGroup::Photo),
    0x9012_u16 => TagDef::new("OffsetTimeDigitized", TagGroup::Photo),
    0x9101_u16 => TagDef::new("ComponentsConfiguration", TagGroup::Photo),
    0x9102_u16 => TagDef::new("CompressedBitsPerPixel", TagGroup::Photo),
    0x9201_u16 => TagDef::new("ShutterSpeedValue", TagGroup::Photo),
    0x9202_u16 => TagDef::new("ApertureValue", TagGroup::Photo),
    0x9203_u16 => TagDef::new("BrightnessValue", TagGroup::Photo),
    0x9204_u16 => TagDef::new("ExposureCompensation", TagGroup::Photo),
    0x9205_u16 => TagDef::new("MaxApertureValue", TagGroup::Photo),
    0x9206_u16 => TagDef::new("SubjectDistance", TagGroup::Photo),
    0x9207_u16 => TagDef::new("MeteringMode", TagGroup::Photo),
    0x9208_u16 => TagDef::new("LightSource", TagGroup::Photo),
    0x9209_u16 => TagDef::new("Flash", TagGroup::Photo),
    0x920A_u16 => TagDef::new("FocalLength", TagGroup::Photo),
    0x9214_u16 => TagDef::new("SubjectArea", TagGroup::Photo),
    0x927C_u16 => TagDef::new("MakerNote", TagGroup::Photo),
    0x9286_u16 => TagDef::new("UserComment", TagGroup::Photo),
    0x9290_u16 => TagDef::new("SubSecTime", TagGroup::Photo),
    0x9291_u16 => TagDef::new("SubSecTimeOriginal", TagGroup::Photo),
    0x9292_u16 => TagDef::new("SubSecTimeDigitized", TagGroup::Photo),
    0xA000_u16 => TagDef::new("FlashpixVersion", TagGroup::Photo),
    0xA001_u16 => TagDef::new("ColorSpace", TagGroup::Photo),
    0xA002_u16 => TagDef::new("ExifImageWidth", TagGroup::Photo),
    0xA003_u16 => TagDef::new("ExifImageHeight", TagGroup::Photo),
    0xA004_u16 => TagDef::new("RelatedSoundFile", TagGroup::Photo),
    0xA005_u16 => TagDef::new("InteropOffset", TagGroup::Photo),
    0xA20E_u16 => TagDef::new("FocalPlaneXResolution", TagGroup::Photo),
    0xA20F_u16 => TagDef::new("FocalPlaneYResolution", TagGroup::Photo),
    0xA210_u16 => TagDef::new("FocalPlaneResolutionUnit", TagGroup::Photo),
    0xA215_u16 => TagDef::new("ExposureIndex", TagGroup::Photo),
    0xA217_u16 => TagDef::new("SensingMethod", TagGroup::Photo),
    0xA300_u16 => TagDef::new("FileSource", TagGroup::Photo),
    0xA301_u16 => TagDef::new("SceneType", TagGroup::Photo),
    0xA302_u16 => TagDef::new("CFAPattern", TagGroup::Photo),
    0xA401_u16 => TagDef::new("CustomRendered", TagGroup::Photo),
    0xA402_u16 => TagDef::new("ExposureMode", TagGroup::Photo),
    0xA403_u16 => TagDef::new("WhiteBalance", TagGroup::Photo),
    0xA404_u16 => TagDef::new("DigitalZoomRatio", TagGroup::Photo),
    0xA405_u16 => TagDef::new("FocalLengthIn35mmFormat", TagGroup::Photo),
    0xA406_u16 => TagDef::new("SceneCaptureType", TagGroup::Photo),
    0xA407_u16 => TagDef::new("GainControl", TagGroup::Photo),
    0xA408_u16 => TagDef::new("Contrast", TagGroup::Photo),
    0xA409_u16 => TagDef::new("Saturation", TagGroup::Photo),
    0xA40A_u16 => TagDef::new("Sharpness", TagGroup::Photo),
    0xA40C_u16 => TagDef::new("SubjectDistanceRange", TagGroup::Photo),
    0xA420_u16 => TagDef::new("ImageUniqueID", TagGroup::Photo),
    0xA430_u16 => TagDef::new("OwnerName", TagGroup::Photo),
    0xA431_u16 => TagDef::new("SerialNumber", TagGroup::Photo),
    0xA432_u16 => TagDef::new("LensInfo", TagGroup::Photo),
    0xA433_u16 => TagDef::new("LensMake", TagGroup::Photo),
    0xA434_u16 => TagDef::new("LensModel", TagGroup::Photo),
    0xA435_u16 => TagDef::new("LensSerialNumber", TagGroup::Photo),
};

/// GPS sub-IFD tags.
pub static GPS_TAGS: phf::Map<u16, TagDef> = phf_map! {
    0x0000_u16 => TagDef::new("GPSVersionID", TagGroup::GpsInfo),
    0x0001_u16 => TagDef::new("GPSLatitudeRef", TagGroup::GpsInfo),
    0x0002_u16 => TagDef::new("GPSLatitude", TagGroup::GpsInfo),
    0x0003_u16 => TagDef::new("GPSLongitudeRef", TagGroup::GpsInfo),
    0x0004_u16 => TagDef::new("GPSLongitude", TagGroup::GpsInfo),
    0x0005_u16 => TagDef::new("GPSAltitudeRef", TagGroup::GpsInfo),
    0x0006_u16 => TagDef::new("GPSAltitude", TagGroup::GpsInfo),
    0x0007_u16 => TagDef::new("GPSTimeStamp", TagGroup::GpsInfo),
    0x0008_u16 => TagDef::new("GPSSatellites", TagGroup::GpsInfo),
    0x0009_u16 => TagDef::new("GPSStatus", TagGroup::GpsInfo),
    0x000A_u16 => TagDef::new("GPSMeasureMode", TagGroup::GpsInfo),
    0x000B_u16 => TagDef::new("GPSDOP", TagGroup::GpsInfo),
    0x000C_u16 => TagDef::new("GPSSpeedRef", TagGroup::GpsInfo),
    0x000D_u16 => TagDef::new("GPSSpeed", TagGroup::GpsInfo),
    0x000E_u16 => TagDef::new("GPSTrackRef", TagGroup::GpsInfo),
    0x000F_u16 => TagDef::new("GPSTrack", TagGroup::GpsInfo),
    0x0010_u16 => TagDef::new("GPSImgDirectionRef", TagGroup::GpsInfo),
    0x0011_u16 => TagDef::new("GPSImgDirection", TagGroup::GpsInfo),
    0x0012_u16 => TagDef::new("GPSMapDatum", TagGroup::GpsInfo),
    0x0013_u16 => TagDef::new("GPSDestLatitudeRef", TagGroup::GpsInfo),
    0x0014_u16 => TagDef::new("GPSDestLatitude", TagGroup::GpsInfo),
    0x0015_u16 => TagDef::new("GPSDestLongitudeRef", TagGroup::GpsInfo),
    0x0016_u16 => TagDef::new("GPSDestLongitude", TagGroup::GpsInfo),
    0x0017_u16 => TagDef::new("GPSDestBearingRef", TagGroup::GpsInfo),
    0x0018_u16 => TagDef::new("GPSDestBearing", TagGroup::GpsInfo),
    0x0019_u16 => TagDef::new("GPSDestDistanceRef", TagGroup::GpsInfo),
    0x001A_u16 => TagDef::new("GPSDestDistance", TagGroup::GpsInfo),
    0x001B_u16 => TagDef::new("GPSProcessingMethod", TagGroup::GpsInfo),
    0x001C_u16 => TagDef::new("GPSAreaInformation", TagGroup::GpsInfo),
    0x001D_u16 => TagDef::new("GPSDateStamp", TagGroup::GpsInfo),
    0x001E_u16 => TagDef::new("GPSDifferential", TagGroup::GpsInfo),
    0x001F_u16 => TagDef::new("GPSHPositioningError", TagGroup::GpsInfo),
};

/// Looks up a tag's definition within one specific namespace.
pub fn lookup_in_group(tag_id: u16, group: TagGroup) -> Option<&'static TagDef> {
    match group {
        TagGroup::Image => IMAGE_TAGS.get(&tag_id),
        TagGroup::Photo => PHOTO_TAGS.get(&tag_id),
        TagGroup::GpsInfo => GPS_TAGS.get(&tag_id),
    }
}

/// Looks up a tag's human-readable name across all namespaces, merged by
/// first-match-wins lookup order: `Image`, then `Photo`, then `GPSInfo`.
/// A tag present in more than one namespace (e.g. `0x829A` ExposureTime,
/// which this dictionary lists under both `Image` and `Photo`) resolves to
/// the first namespace's name.
pub fn lookup_tag(tag_id: u16) -> Option<&'static str> {
    IMAGE_TAGS
        .get(&tag_id)
        .or_else(|| PHOTO_TAGS.get(&tag_id))
        .or_else(|| GPS_TAGS.get(&tag_id))
        .map(|def| def.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_tags() {
        assert_eq!(lookup_tag(0x0112), Some("Orientation"));
        assert_eq!(lookup_tag(0x829D), Some("FNumber"));
        assert_eq!(lookup_tag(0x0002), Some("GPSLatitude"));
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(lookup_tag(0xFFFF), None);
    }

    #[test]
    fn first_match_wins_across_namespaces() {
        // ExposureTime (0x829A) is listed in both Image and Photo here;
        // the merged lookup must resolve to the Image-namespace entry.
        let def = lookup_in_group(0x829A, TagGroup::Image).unwrap();
        assert_eq!(def.group, TagGroup::Image);
        assert_eq!(lookup_tag(0x829A), Some("ExposureTime"));
    }
}

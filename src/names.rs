//! Source skeleton bone names -> canonical (LAFAN1-style) bone names.

/// Every known source name with its canonical counterpart. Names missing here
/// are already canonical.
pub const BONE_NAME_TABLE: [(&str, &str); 18] = [
    ("Hips", "Hips"),
    ("Chest", "Spine2"),
    ("Neck", "Neck"),
    ("Head", "Head"),
    ("LeftCollar", "LeftCollar"),
    ("LeftShoulder", "LeftArm"),
    ("LeftElbow", "LeftForeArm"),
    ("LeftWrist", "LeftHand"),
    ("RightCollar", "RightCollar"),
    ("RightShoulder", "RightArm"),
    ("RightElbow", "RightForeArm"),
    ("RightWrist", "RightHand"),
    ("LeftHip", "LeftUpLeg"),
    ("LeftKnee", "LeftLeg"),
    ("LeftAnkle", "LeftFoot"),
    ("RightHip", "RightUpLeg"),
    ("RightKnee", "RightLeg"),
    ("RightAnkle", "RightFoot"),
];

pub fn canonical_bone_name(name: &str) -> &str {
    BONE_NAME_TABLE
        .iter()
        .find(|(source, _)| *source == name)
        .map_or(name, |&(_, canonical)| canonical)
}

pub fn canonical_bone_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| canonical_bone_name(name).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_are_mapped() {
        assert_eq!(canonical_bone_name("Chest"), "Spine2");
        assert_eq!(canonical_bone_name("LeftAnkle"), "LeftFoot");
        assert_eq!(canonical_bone_name("RightWrist"), "RightHand");
        assert_eq!(canonical_bone_name("Hips"), "Hips");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        assert_eq!(canonical_bone_name("LeftToe"), "LeftToe");
        assert_eq!(canonical_bone_name(""), "");
        // lookups are case sensitive
        assert_eq!(canonical_bone_name("chest"), "chest");
    }

    #[test]
    fn test_batch_keeps_order() {
        let mapped = canonical_bone_names(["LeftHip", "Tail", "RightKnee"]);
        assert_eq!(mapped, vec!["LeftUpLeg", "Tail", "RightLeg"]);
    }
}

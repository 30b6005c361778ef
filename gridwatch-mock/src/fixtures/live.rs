//! PN, MEL and BOAL payloads for 2024-05-01, in the upstream stream shape.

use super::{MORAY_EAST_1, MORAY_EAST_2, SEAGREEN};

pub fn baseline(unit: &str) -> Option<&'static str> {
    match unit {
        SEAGREEN => Some(
            r#"[
            {"bmUnit":"T_SGRWO-1","timeFrom":"2024-05-01T00:00:00Z","timeTo":"2024-05-01T00:30:00Z","levelFrom":100,"levelTo":100},
            {"bmUnit":"T_SGRWO-1","timeFrom":"2024-05-01T00:30:00Z","timeTo":"2024-05-01T01:00:00Z","levelFrom":120,"levelTo":120},
            {"bmUnit":"T_SGRWO-1","timeFrom":"2024-05-01T01:00:00Z","timeTo":"2024-05-01T01:30:00Z","levelFrom":125,"levelTo":125},
            {"bmUnit":"T_SGRWO-1","timeFrom":"2024-05-01T01:30:00Z","timeTo":"2024-05-01T02:00:00Z","levelFrom":110,"levelTo":110}
        ]"#,
        ),
        MORAY_EAST_1 => Some(
            r#"[
            {"bmUnit":"T_MOWEO-1","timeFrom":"2024-05-01T00:00:00Z","timeTo":"2024-05-01T01:00:00Z","levelFrom":200,"levelTo":200},
            {"bmUnit":"T_MOWEO-1","timeFrom":"2024-05-01T01:00:00Z","timeTo":"2024-05-01T02:00:00Z","levelFrom":210,"levelTo":210}
        ]"#,
        ),
        MORAY_EAST_2 => Some(
            r#"[
            {"bmUnit":"T_MOWEO-2","timeFrom":"2024-05-01T00:00:00Z","timeTo":"2024-05-01T01:00:00Z","levelFrom":190,"levelTo":190},
            {"bmUnit":"T_MOWEO-2","timeFrom":"2024-05-01T00:30:00Z","timeTo":"2024-05-01T01:00:00Z","levelTo":190},
            {"bmUnit":"T_MOWEO-2","timeFrom":"2024-05-01T01:00:00Z","timeTo":"2024-05-01T02:00:00Z","levelFrom":195,"levelTo":195}
        ]"#,
        ),
        _ => None,
    }
}

pub fn capacity(unit: &str) -> Option<&'static str> {
    match unit {
        SEAGREEN => Some(
            r#"[{"bmUnit":"T_SGRWO-1","timeFrom":"2024-05-01T00:00:00Z","timeTo":"2024-05-01T02:00:00Z","levelFrom":150,"levelTo":150}]"#,
        ),
        MORAY_EAST_1 => Some(
            r#"[{"bmUnit":"T_MOWEO-1","timeFrom":"2024-05-01T00:00:00Z","timeTo":"2024-05-01T02:00:00Z","levelFrom":250,"levelTo":250}]"#,
        ),
        MORAY_EAST_2 => Some(
            r#"[{"bmUnit":"T_MOWEO-2","timeFrom":"2024-05-01T00:00:00Z","timeTo":"2024-05-01T02:00:00Z","levelFrom":240,"levelTo":240}]"#,
        ),
        _ => None,
    }
}

pub fn overrides(unit: &str) -> Option<&'static str> {
    match unit {
        SEAGREEN => Some(
            r#"[{"bmUnit":"T_SGRWO-1","timeFrom":"2024-05-01T00:15:00Z","timeTo":"2024-05-01T00:45:00Z","levelFrom":80,"levelTo":80,"acceptanceNumber":101,"acceptanceTime":"2024-05-01T00:05:00Z"}]"#,
        ),
        MORAY_EAST_1 => Some(
            r#"[{"bmUnit":"T_MOWEO-1","timeFrom":"2024-05-01T00:50:00Z","timeTo":"2024-05-01T01:20:00Z","levelFrom":150,"levelTo":150,"acceptanceNumber":202,"acceptanceTime":"2024-05-01T00:40:00Z"}]"#,
        ),
        MORAY_EAST_2 => Some("[]"),
        _ => None,
    }
}

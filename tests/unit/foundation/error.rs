use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PlanetError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PlanetError::metadata("x")
            .to_string()
            .contains("metadata error:")
    );
    assert!(PlanetError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn tiles_error_reports_count_and_first_failure() {
    let err = PlanetError::Tiles {
        total: 4,
        failures: vec![
            TileError::Fetch {
                x: 1,
                y: 0,
                reason: "timed out".to_string(),
            },
            TileError::Decode {
                x: 1,
                y: 1,
                reason: "bad magic".to_string(),
            },
        ],
    };
    let msg = err.to_string();
    assert!(msg.starts_with("2 of 4 tiles failed"));
    assert!(msg.contains("tile (1, 0) fetch failed: timed out"));
}

#[test]
fn tile_error_cell() {
    let e = TileError::Decode {
        x: 3,
        y: 2,
        reason: String::new(),
    };
    assert_eq!(e.cell(), (3, 2));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PlanetError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

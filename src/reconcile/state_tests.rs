//! Tests for target state parsing.

use super::TargetState;

#[test]
fn parses_case_insensitively() {
    assert_eq!("present".parse::<TargetState>(), Ok(TargetState::Present));
    assert_eq!("ABSENT".parse::<TargetState>(), Ok(TargetState::Absent));
}

#[test]
fn unknown_state_is_rejected() {
    let err = "enabled".parse::<TargetState>().unwrap_err();

    assert_eq!(err.to_string(), "Invalid state 'enabled': expected present or absent");
}

#[test]
fn default_is_present() {
    assert_eq!(TargetState::default(), TargetState::Present);
}

#[test]
fn display_matches_serde_name() {
    let json = serde_json::to_string(&TargetState::Absent).unwrap();

    assert_eq!(json, format!("\"{}\"", TargetState::Absent));
}

use rhg_core::{GeneratorError, GeneratorErrorCode, ReplayError, ReplayErrorCode};
use rstest::rstest;

#[rstest]
#[case(
    GeneratorError::OutsideDisk { point: 1, radius: 0.9, bound: 0.5 },
    GeneratorErrorCode::OutsideDisk,
    "RHG_OUTSIDE_DISK",
)]
#[case(
    GeneratorError::InvalidAngle { point: 0, angle: 7.0 },
    GeneratorErrorCode::InvalidAngle,
    "RHG_INVALID_ANGLE",
)]
#[case(
    GeneratorError::InvalidQueryPoint { angle: 0.0, radius: 1.0 },
    GeneratorErrorCode::InvalidQueryPoint,
    "RHG_INVALID_QUERY_POINT",
)]
#[case(
    GeneratorError::NegativeThreshold { threshold: -1.0 },
    GeneratorErrorCode::NegativeThreshold,
    "RHG_NEGATIVE_THRESHOLD",
)]
#[case(
    GeneratorError::InvalidParameter { name: "stretch", reason: "zero".into() },
    GeneratorErrorCode::InvalidParameter,
    "RHG_INVALID_PARAMETER",
)]
#[case(GeneratorError::DuplicatePoint { point: 3 }, GeneratorErrorCode::DuplicatePoint, "RHG_DUPLICATE_POINT")]
#[case(GeneratorError::UnknownPoint { point: 3 }, GeneratorErrorCode::UnknownPoint, "RHG_UNKNOWN_POINT")]
#[case(
    GeneratorError::LengthMismatch { angles: 2, radii: 3 },
    GeneratorErrorCode::LengthMismatch,
    "RHG_LENGTH_MISMATCH",
)]
#[case(
    GeneratorError::UnreachableDegree { nodes: 10, average_degree: 20.0, exponent: 3.0 },
    GeneratorErrorCode::UnreachableDegree,
    "RHG_UNREACHABLE_DEGREE",
)]
fn returns_expected_generator_code(
    #[case] error: GeneratorError,
    #[case] expected: GeneratorErrorCode,
    #[case] code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), code);
    assert_eq!(expected.to_string(), code);
}

#[rstest]
#[case(ReplayError::DuplicateEdge { u: 0, v: 1 }, ReplayErrorCode::DuplicateEdge)]
#[case(ReplayError::MissingEdge { u: 0, v: 1 }, ReplayErrorCode::MissingEdge)]
#[case(ReplayError::UnknownNode { node: 4 }, ReplayErrorCode::UnknownNode)]
#[case(
    ReplayError::NodeIdMismatch { announced: 3, assigned: 2 },
    ReplayErrorCode::NodeIdMismatch,
)]
#[case(ReplayError::SelfLoop { node: 1 }, ReplayErrorCode::SelfLoop)]
fn returns_expected_replay_code(#[case] error: ReplayError, #[case] expected: ReplayErrorCode) {
    assert_eq!(error.code(), expected);
    assert!(error.code().as_str().starts_with("REPLAY_"));
}

#[test]
fn messages_name_the_offending_values() {
    let error = GeneratorError::OutsideDisk {
        point: 4,
        radius: 0.75,
        bound: 0.5,
    };
    assert_eq!(
        error.to_string(),
        "point 4 has radius 0.75, outside the disk of radius 0.5"
    );
    assert_eq!(
        ReplayError::MissingEdge { u: 2, v: 9 }.to_string(),
        "edge (2, 9) is not present"
    );
}

use std::io;

use payload_scaffold::error::Error;
use payload_scaffold::validation::ValidationError;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::SpecParseError("expected value".to_string());
    assert_eq!(err.to_string(), "Failed to parse project spec: expected value.");

    let err = Error::UnsupportedTool("drop_database".to_string());
    assert_eq!(err.to_string(), "Unsupported tool: 'drop_database'.");

    let err = Error::InvalidToolArguments {
        tool: "generate_field".to_string(),
        reason: "missing field `options`".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid arguments for tool 'generate_field': missing field `options`."
    );

    let err = Error::OutputDirectoryExistsError { output_dir: "out".to_string() };
    assert_eq!(
        err.to_string(),
        "Output directory 'out' already exists. Use --force to overwrite it."
    );

    let err = Error::InvalidValueTypes(vec![ValidationError::new(
        "INVALID_VALUE_TYPE",
        "Expected a string, found a number",
        "projectName",
    )]);
    assert_eq!(err.to_string(), "Project spec has 1 value(s) of the wrong type.");

    let err = Error::ValidationFailed(3);
    assert_eq!(err.to_string(), "Project spec has 3 validation error(s).");
}

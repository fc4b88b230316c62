mod build_keys;

/// Main function for the build script building the following assets:
/// - Translation keys and per-language string tables
///
/// # Returns
/// A `Result` indicating success or failure.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    build_keys::build()?;
    Ok(())
}

use dialoguer::Input;
use drift_checker::DriftError;

/// Asks for a value on the terminal when it was not given as a flag.
pub fn prompt_input(label: &str) -> Result<String, DriftError> {
    let value: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| DriftError::Config(format!("prompt failed: {e}")))?;

    Ok(value.trim().to_string())
}

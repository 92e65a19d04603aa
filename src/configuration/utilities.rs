use std::{collections::HashMap, env::current_dir, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};


/// Returns the default configuration file path, `{current directory}/data/configuration.toml`.
pub fn get_default_configuration_file_path() -> Result<PathBuf> {
    let mut configuration_file_path = current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))?;
    configuration_file_path.push("data/configuration.toml");

    if !configuration_file_path.is_file() {
        return Err(miette!(
            "No configuration file at {}.",
            configuration_file_path.display()
        ));
    }

    Ok(configuration_file_path)
}

/// Substitutes every placeholder (e.g. `{BASE_DATA_DIRECTORY}`) in `original_path`.
#[must_use = "function returns the modified path"]
pub fn replace_placeholders_in_path<S>(
    original_path: S,
    placeholders: &HashMap<&'static str, String>,
) -> PathBuf
where
    S: Into<String>,
{
    let mut path_string: String = original_path.into();

    for (placeholder, value) in placeholders {
        path_string = path_string.replace(placeholder, value);
    }

    PathBuf::from(path_string)
}

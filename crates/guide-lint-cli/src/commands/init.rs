//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

/// Commented configuration written by `guide-lint init`.
pub const DEFAULT_CONFIG: &str = r#"# guide-lint configuration
# Every setting is optional; the values below are the built-in defaults.

[analyzer]
# Glob patterns to exclude from directory walks
exclude = [
    "**/node_modules/**",
    "**/target/**",
]

# Respect .gitignore files
respect_gitignore = true

[naming]
# Directories that mark where documentation and plans live
documentation_roots = ["docs", "documentation"]
plan_roots = ["plans", "plan"]

# Accepted filename suffixes under each root
documentation_suffixes = ["_documentation", "_guidelines", "_skill"]
plan_suffixes = ["_plan"]

[quality]
# Checklist items each plan objective needs
min_actions_per_objective = 5
# Fraction of checklist items that must carry a verification step
min_verification_ratio = 0.5
verification_marker = "**Verification"
verification_window = 3

# Rule overrides, keyed by the ids from `guide-lint list-rules`
# [rules.forbidden-phrase-tier4-simply]
# enabled = false

# [rules.code-block-language]
# severity = "warning"

# Additional forbidden phrases
# [[phrases]]
# phrase = "lorem ipsum"
# tier = 1
# severity = "fatal"
"#;

/// Config file name written by `init`.
pub const CONFIG_FILE_NAME: &str = "guide-lint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    write_config(config_path, force)?;

    println!("Created {CONFIG_FILE_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Run: guide-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

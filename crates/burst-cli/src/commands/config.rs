//! Config command

use anyhow::{Context, Result};
use burst_particles::ParticleConfig;

pub fn run(output: Option<&str>) -> Result<()> {
    let text = ParticleConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;

    match output {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("Failed to write {}", path))?;
            println!("Wrote default particle config to {}", path);
        }
        None => print!("{}", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_config_loads_back_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("particles.toml");
        run(Some(path.to_str().unwrap())).unwrap();

        let loaded = ParticleConfig::load(&path).unwrap();
        assert_eq!(loaded, ParticleConfig::default());
    }
}

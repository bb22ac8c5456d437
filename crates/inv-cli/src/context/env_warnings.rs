/// Config sections read from `INVENTORY_<SECTION>__<KEY>`.
const SECTIONS: [&str; 2] = ["DATABASE", "GENERAL"];

/// Warn about env vars that look like config keys but were silently ignored.
pub fn warn_misnamed_env() {
    for warning in collect_env_warnings(std::env::vars().map(|(key, _)| key)) {
        tracing::warn!("{warning}");
    }
}

fn collect_env_warnings<I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut warnings = Vec::new();
    for key in keys {
        for section in SECTIONS {
            let single = format!("INVENTORY_{section}_");
            let double = format!("INVENTORY_{section}__");
            if key.starts_with(&single) && !key.starts_with(&double) {
                let suggested = key.replacen(&single, &double, 1);
                warnings.push(format!(
                    "{key} is ignored. Use double underscores to nest config keys (example: {suggested})."
                ));
            }
        }
    }
    warnings
}

/// Parse a `category:title[:quantity]` tag argument.
pub fn parse_tag_arg(arg: &str) -> anyhow::Result<(String, String, Option<u32>)> {
    let mut parts = arg.splitn(3, ':');
    let category = parts.next().unwrap_or_default();
    let title = parts.next().unwrap_or_default();
    if category.is_empty() || title.is_empty() {
        return Err(anyhow::anyhow!(
            "Invalid tag '{}': expected category:title[:quantity]",
            arg
        ));
    }
    let quantity = match parts.next() {
        Some(q) => Some(
            q.parse()
                .map_err(|_| anyhow::anyhow!("Invalid tag quantity '{}' in '{}'", q, arg))?,
        ),
        None => None,
    };
    Ok((category.to_string(), title.to_string(), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tag_without_quantity() {
        let (category, title, quantity) = parse_tag_arg("smoking:butts").unwrap();
        assert_eq!(category, "smoking");
        assert_eq!(title, "butts");
        assert_eq!(quantity, None);
    }

    #[test]
    fn parses_tag_with_quantity() {
        let (category, title, quantity) = parse_tag_arg("alcohol:beer-cans:6").unwrap();
        assert_eq!(category, "alcohol");
        assert_eq!(title, "beer-cans");
        assert_eq!(quantity, Some(6));
    }

    #[test]
    fn rejects_malformed_tags() {
        assert!(parse_tag_arg("no-title").is_err());
        assert!(parse_tag_arg(":missing-category").is_err());
        assert!(parse_tag_arg("smoking:butts:lots").is_err());
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

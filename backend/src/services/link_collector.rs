use crate::models::Platform;
use crate::services::platform::PlatformRegistry;
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CollectedLink {
    pub url: String,
    pub platform: Platform,
}

#[derive(Debug, Default, PartialEq)]
pub struct Collected {
    pub links: Vec<CollectedLink>,
    pub ignored: usize,
}

/// Splits comma-separated input and keeps tokens a registered platform recognises,
/// in order of appearance.
pub fn collect_links(input: &str, registry: &PlatformRegistry) -> Collected {
    let mut collected = Collected::default();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match registry.classify(token) {
            Some(platform) => collected.links.push(CollectedLink {
                url: token.to_string(),
                platform,
            }),
            None => {
                debug!("Ignoring unrecognised link: {token}");
                collected.ignored += 1;
            }
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_recognised_tokens_in_order() {
        let registry = PlatformRegistry::default();
        let collected = collect_links(
            " https://youtu.be/a ,https://www.tiktok.com/@u/video/1,  https://youtube.com/shorts/b",
            &registry,
        );

        let urls: Vec<&str> = collected.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://youtu.be/a",
                "https://www.tiktok.com/@u/video/1",
                "https://youtube.com/shorts/b"
            ]
        );
        assert_eq!(collected.links[1].platform, Platform::TikTok);
        assert_eq!(collected.ignored, 0);
    }

    #[test]
    fn drops_empty_and_unknown_tokens() {
        let registry = PlatformRegistry::default();
        let collected = collect_links(",, ,https://vimeo.com/1, https://youtu.be/a,", &registry);

        assert_eq!(collected.links.len(), 1);
        assert_eq!(collected.ignored, 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let registry = PlatformRegistry::default();
        let collected = collect_links("https://youtu.be/a,https://youtu.be/a", &registry);
        assert_eq!(collected.links.len(), 2);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let collected = collect_links("   ", &PlatformRegistry::default());
        assert_eq!(collected, Collected::default());
    }
}

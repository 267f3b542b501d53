use crate::models::{AspectRatio, ImageModel};

/// Builds the GET URL for one generation.
///
/// The prompt is trimmed and percent-encoded after `base_url`; `/` is left
/// as is, so a prompt containing it spans several path segments. Query parameters follow in a fixed order: `model`, `width`,
/// `height`, then `seed` when it is non-zero. A zero seed leaves the choice to
/// the remote service and is never sent.
///
/// Emptiness of the prompt is not checked here; see [`crate::ImageRequest::new`].
pub fn build_url(
    base_url: &str,
    prompt: &str,
    model: ImageModel,
    aspect_ratio: AspectRatio,
    seed: u64,
) -> String {
    let encoded_prompt = prompt
        .trim()
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");

    let (width, height) = aspect_ratio.dimensions();
    let mut params = vec![
        format!("model={}", model.as_str()),
        format!("width={}&height={}", width, height),
    ];
    if seed > 0 {
        params.push(format!("seed={}", seed));
    }

    let query = params.join("&");
    if query.is_empty() {
        format!("{}{}", base_url, encoded_prompt)
    } else {
        format!("{}{}?{}", base_url, encoded_prompt, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    fn prompt_segment(url: &str) -> &str {
        let rest = url.strip_prefix(DEFAULT_BASE_URL).unwrap();
        rest.split('?').next().unwrap()
    }

    #[test]
    fn test_reference_url() {
        let url = build_url(
            DEFAULT_BASE_URL,
            "A fantasy castle on a floating island",
            ImageModel::Flux,
            AspectRatio::Square,
            0,
        );
        assert_eq!(
            url,
            "https://image.pollinations.ai/prompt/A%20fantasy%20castle%20on%20a%20floating%20island?model=flux&width=768&height=768"
        );
    }

    #[test]
    fn test_deterministic() {
        for model in ImageModel::ALL {
            for aspect in AspectRatio::ALL {
                for seed in [0, 1, 987_654_321] {
                    let a = build_url(DEFAULT_BASE_URL, "koi pond, ukiyo-e", model, aspect, seed);
                    let b = build_url(DEFAULT_BASE_URL, "koi pond, ukiyo-e", model, aspect, seed);
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_seed_only_when_positive() {
        let url = build_url(DEFAULT_BASE_URL, "fox", ImageModel::Sd3, AspectRatio::Square, 0);
        assert!(!url.contains("seed="));

        let url = build_url(DEFAULT_BASE_URL, "fox", ImageModel::Sd3, AspectRatio::Square, 1234);
        assert_eq!(url.matches("seed=").count(), 1);
        assert!(url.ends_with("&seed=1234"));
    }

    #[test]
    fn test_aspect_ratio_dimensions_in_query() {
        let cases = [
            (AspectRatio::Square, "width=768&height=768"),
            (AspectRatio::Portrait, "width=640&height=896"),
            (AspectRatio::Landscape, "width=896&height=640"),
        ];
        for (aspect, expected) in cases {
            let url = build_url(DEFAULT_BASE_URL, "fox", ImageModel::Flux, aspect, 0);
            assert!(url.contains(expected), "{} missing from {}", expected, url);
        }
    }

    #[test]
    fn test_model_parameter() {
        let url = build_url(
            DEFAULT_BASE_URL,
            "fox",
            ImageModel::StableDiffusion,
            AspectRatio::Landscape,
            7,
        );
        assert_eq!(
            url,
            "https://image.pollinations.ai/prompt/fox?model=stable-diffusion&width=896&height=640&seed=7"
        );
    }

    #[test]
    fn test_prompt_decodes_to_trimmed_input() {
        let prompts = [
            "  A fantasy castle on a floating island \n",
            "50% off & free? #deal",
            "path/like/prompt",
            "caf\u{e9} au lait \u{2615} \u{65e5}\u{672c}",
            "plus+sign=equals",
        ];
        for prompt in prompts {
            let url = build_url(DEFAULT_BASE_URL, prompt, ImageModel::Flux, AspectRatio::Square, 0);
            let segment = prompt_segment(&url);
            assert!(
                !segment.contains(|c: char| matches!(c, '?' | '&' | '#' | ' ')),
                "{}",
                segment
            );
            assert_eq!(urlencoding::decode(segment).unwrap(), prompt.trim());
        }
    }

    #[test]
    fn test_slash_is_not_encoded() {
        let url = build_url(
            DEFAULT_BASE_URL,
            " path/like/prompt ",
            ImageModel::Flux,
            AspectRatio::Square,
            0,
        );
        assert_eq!(
            url,
            "https://image.pollinations.ai/prompt/path/like/prompt?model=flux&width=768&height=768"
        );

        let url = build_url(DEFAULT_BASE_URL, "1/2 cup", ImageModel::Flux, AspectRatio::Square, 0);
        assert_eq!(prompt_segment(&url), "1/2%20cup");
    }

    #[test]
    fn test_blank_prompt_still_builds() {
        let url = build_url(
            "http://127.0.0.1:9/p/",
            "   ",
            ImageModel::Sdxl,
            AspectRatio::Portrait,
            0,
        );
        assert_eq!(url, "http://127.0.0.1:9/p/?model=sdxl&width=640&height=896");
    }
}

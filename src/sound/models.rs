use serde::Deserialize;

/// Body of `GET /search/text/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: u64,
}

/// Body of `GET /sounds/<id>/`; only the preview links matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct SoundDetail {
    #[serde(default)]
    pub previews: Option<Previews>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Previews {
    #[serde(rename = "preview-lq-mp3", default)]
    pub lq_mp3: Option<String>,
    #[serde(rename = "preview-hq-mp3", default)]
    pub hq_mp3: Option<String>,
}

impl SearchResponse {
    pub fn first_id(&self) -> Option<u64> {
        self.results.first().map(|hit| hit.id)
    }
}

impl SoundDetail {
    /// Low-quality preview when available, else high-quality.
    pub fn preview_url(&self) -> Option<String> {
        let previews = self.previews.as_ref()?;
        previews
            .lq_mp3
            .clone()
            .filter(|url| !url.is_empty())
            .or_else(|| previews.hq_mp3.clone().filter(|url| !url.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_takes_first_result() {
        let body = r#"{"count": 2, "results": [{"id": 1234, "name": "rain"}, {"id": 99}]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.first_id(), Some(1234));
    }

    #[test]
    fn empty_or_missing_results() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"results": []}"#).expect("parse");
        assert_eq!(parsed.first_id(), None);
        let parsed: SearchResponse = serde_json::from_str(r#"{"count": 0}"#).expect("parse");
        assert_eq!(parsed.first_id(), None);
    }

    #[test]
    fn prefers_low_quality_preview() {
        let body = r#"{"id": 5, "previews": {
            "preview-hq-mp3": "https://cdn/hq.mp3",
            "preview-lq-mp3": "https://cdn/lq.mp3",
            "preview-lq-ogg": "https://cdn/lq.ogg"
        }}"#;
        let parsed: SoundDetail = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.preview_url().as_deref(), Some("https://cdn/lq.mp3"));
    }

    #[test]
    fn falls_back_to_high_quality_preview() {
        let body = r#"{"previews": {"preview-hq-mp3": "https://cdn/hq.mp3"}}"#;
        let parsed: SoundDetail = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.preview_url().as_deref(), Some("https://cdn/hq.mp3"));
    }

    #[test]
    fn no_previews_is_none() {
        let parsed: SoundDetail = serde_json::from_str(r#"{"id": 5}"#).expect("parse");
        assert_eq!(parsed.preview_url(), None);
        let parsed: SoundDetail =
            serde_json::from_str(r#"{"previews": {"preview-lq-ogg": "x"}}"#).expect("parse");
        assert_eq!(parsed.preview_url(), None);
    }
}

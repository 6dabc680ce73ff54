use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::models::lesson::Video;
use crate::services::demo_content;

const MAX_RESULTS: &str = "5";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(default)]
    channel_title: String,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    #[serde(default)]
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchItem {
    fn into_video(self) -> Option<Video> {
        let id = self.id.video_id?;
        Some(Video {
            url: format!("https://www.youtube.com/embed/{}", id),
            id,
            title: self.snippet.title,
            description: self.snippet.description,
            thumbnail: self
                .snippet
                .thumbnails
                .medium
                .map(|t| t.url)
                .unwrap_or_default(),
            channel_title: self.snippet.channel_title,
            duration: None,
        })
    }
}

pub struct VideoSearch {
    http: Client,
    api_url: String,
    api_key: Option<String>,
}

impl VideoSearch {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.completion_timeout_seconds))
            .build()
            .context("Failed to build video search HTTP client")?;

        Ok(Self {
            http,
            api_url: config.video_api_url.clone(),
            api_key: config.video_api_key.clone().filter(|k| k != "demo-key"),
        })
    }

    /// Ranked educational videos for a topic. Failures are logged and yield an empty list.
    pub async fn search(&self, topic: &str, grade: &str) -> Vec<Video> {
        let Some(api_key) = self.api_key.as_deref() else {
            return demo_content::videos(topic, grade);
        };

        match self.fetch(api_key, topic, grade).await {
            Ok(videos) => videos,
            Err(e) => {
                tracing::error!("Video search failed for topic={}: {:#}", topic, e);
                Vec::new()
            }
        }
    }

    async fn fetch(&self, api_key: &str, topic: &str, grade: &str) -> Result<Vec<Video>> {
        let query = format!("{} {} educational video for students", topic, grade);
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("part", "snippet"),
                ("maxResults", MAX_RESULTS),
                ("q", query.as_str()),
                ("type", "video"),
                ("key", api_key),
            ])
            .send()
            .await
            .context("Failed to call video search API")?;

        if !response.status().is_success() {
            bail!("Video search API returned status: {}", response.status());
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("Invalid video search response")?;

        Ok(body
            .items
            .into_iter()
            .filter_map(SearchItem::into_video)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_items_map_to_embeds_in_rank_order() {
        let raw = r#"{"items":[
            {"id":{"videoId":"abc"},"snippet":{"title":"First","description":"d1",
             "thumbnails":{"medium":{"url":"https://img/1"}},"channelTitle":"C1"}},
            {"id":{"kind":"youtube#channel"},"snippet":{"title":"Channel"}},
            {"id":{"videoId":"def"},"snippet":{"title":"Second"}}
        ]}"#;
        let body: SearchResponse = serde_json::from_str(raw).unwrap();
        let videos: Vec<_> = body
            .items
            .into_iter()
            .filter_map(SearchItem::into_video)
            .collect();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].url, "https://www.youtube.com/embed/abc");
        assert_eq!(videos[0].thumbnail, "https://img/1");
        assert_eq!(videos[0].channel_title, "C1");
        assert_eq!(videos[1].id, "def");
    }

    #[tokio::test]
    async fn demo_mode_returns_fixed_videos() {
        let search = VideoSearch::new(&Config::default()).unwrap();
        let videos = search.search("Volcanoes", "Grade 6").await;
        assert_eq!(videos.len(), 3);
    }
}

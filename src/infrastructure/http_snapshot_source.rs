// HTTP snapshot source implementation
use crate::application::snapshot_source::{FetchError, SnapshotSource};
use crate::domain::point::{GeoPosition, Point, PointId, Snapshot, TrafficStatus};
use async_trait::async_trait;
use serde::Deserialize;

const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SnapshotPayload {
    #[serde(default)]
    points: Option<Vec<PointRecord>>,
}

#[derive(Debug, Deserialize)]
struct PointRecord {
    id: RecordId,
    name: String,
    lat: f64,
    lng: f64,
    vehicle_count: u32,
    status: String,
}

/// Sources send ids as either strings or integers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(serde_json::Number),
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Self {
        let id = match record.id {
            RecordId::Text(id) => id,
            RecordId::Number(id) => id.to_string(),
        };
        Point::new(
            PointId::new(id),
            record.name,
            GeoPosition::new(record.lat, record.lng),
            record.vehicle_count,
            TrafficStatus::from_label(&record.status),
        )
    }
}

impl HttpSnapshotSource {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    fn parse(body: &str) -> Result<Snapshot, FetchError> {
        let payload: SnapshotPayload =
            serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
        let points = payload
            .points
            .unwrap_or_default()
            .into_iter()
            .map(Point::from)
            .collect();
        Ok(Snapshot::new(points))
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status,
                body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
            });
        }

        let body = response.text().await?;
        let snapshot = Self::parse(&body)?;
        tracing::debug!(url = %self.url, points = snapshot.points.len(), "fetched snapshot");
        Ok(snapshot)
    }
}

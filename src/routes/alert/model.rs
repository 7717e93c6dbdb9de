use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 超速上报请求
#[derive(Debug, Clone, Deserialize)]
pub struct AlertRequest {
    pub street: String,
    pub coordinates: Coordinates,
    /// 车速，单位 km/h
    pub speed: f64,
}

/// 坐标按收到的形式原样转发：字符串，或 `[纬度, 经度]` 数组。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Coordinates {
    Text(String),
    Pair(f64, f64),
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinates::Text(text) => f.write_str(text),
            Coordinates::Pair(lat, lng) => write!(f, "{lat},{lng}"),
        }
    }
}

impl AlertRequest {
    /// 生成推送文本，字段不做任何转义
    pub fn to_message(&self) -> String {
        format!(
            "An individual is currently speeding on street \"{}\", coordinates: {} at {}km/h.",
            self.street, self.coordinates, self.speed
        )
    }
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub message: &'static str,
    pub response: Value,
}

// ABOUTME: Report type definitions
// ABOUTME: Scores, strengths, improvements, and the raw evaluation payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub technical_score: Option<f64>,
    pub communication_score: Option<f64>,
    pub creativity_score: Option<f64>,
    pub business_sense_score: Option<f64>,
    pub overall_score: Option<f64>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub detailed_feedback: Option<String>,
    pub evaluation_data: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportCreateInput {
    pub technical_score: Option<f64>,
    pub communication_score: Option<f64>,
    pub creativity_score: Option<f64>,
    pub business_sense_score: Option<f64>,
    pub overall_score: Option<f64>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub detailed_feedback: Option<String>,
    pub evaluation_data: Option<Value>,
}

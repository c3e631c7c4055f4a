//! Graph submission to the analysis endpoint
//!
//! Serializes the current node/edge collections into the analysis wire
//! format, POSTs them on a background thread and funnels the outcome back
//! to the UI through a channel. Submissions are numbered so a response
//! that arrives after a newer submission is discarded instead of
//! overwriting the newer result.

use crate::nodes::{Edge, Node, PipelineGraph};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::thread;
use thiserror::Error;

/// Request body: the full graph as `{nodes, edges}`
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub nodes: Vec<WireNode>,
    pub edges: Vec<WireEdge>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireNode {
    pub id: String,
    #[serde(rename = "type")]
    pub type_id: String,
    pub position: WirePosition,
    pub data: WireNodeData,
}

#[derive(Debug, Clone, Serialize)]
pub struct WirePosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireNodeData {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    #[serde(rename = "isExpanded")]
    pub is_expanded: bool,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireEdge {
    pub id: String,
    pub source: String,
    #[serde(rename = "sourceHandle")]
    pub source_handle: String,
    pub target: String,
    #[serde(rename = "targetHandle")]
    pub target_handle: String,
}

impl From<&Node> for WireNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            type_id: node.type_id.clone(),
            position: WirePosition {
                x: node.position.x,
                y: node.position.y,
            },
            data: WireNodeData {
                inputs: node.inputs.iter().map(|p| p.name.clone()).collect(),
                outputs: node.outputs.iter().map(|p| p.name.clone()).collect(),
                is_expanded: node.is_expanded,
                fields: node.fields.clone(),
            },
        }
    }
}

impl From<&Edge> for WireEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.clone(),
            source_handle: edge.source_port.clone(),
            target: edge.target.clone(),
            target_handle: edge.target_port.clone(),
        }
    }
}

/// Builds the request body from the current graph state
pub fn build_request(graph: &PipelineGraph) -> AnalyzeRequest {
    AnalyzeRequest {
        nodes: graph.nodes.iter().map(WireNode::from).collect(),
        edges: graph.edges.iter().map(WireEdge::from).collect(),
    }
}

/// Summary returned by the analysis endpoint; unknown fields are ignored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzeSummary {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

impl AnalyzeSummary {
    /// "Yes"/"No" rendering of the DAG flag
    pub fn dag_label(&self) -> &'static str {
        if self.is_dag {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Failures at the network boundary
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analysis endpoint returned status {0}")]
    Status(u16),
    #[error("could not decode analysis response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One blocking POST to the analysis endpoint
pub fn post_analyze(endpoint: &str, request: &AnalyzeRequest) -> Result<AnalyzeSummary, AnalyzeError> {
    let response = reqwest::blocking::Client::new()
        .post(endpoint)
        .json(request)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(AnalyzeError::Status(status.as_u16()));
    }

    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

struct AnalyzeEvent {
    generation: u64,
    result: Result<AnalyzeSummary, AnalyzeError>,
}

/// Fire-and-forget analysis client.
///
/// Each `submit` spawns a worker thread; results come back through the
/// channel and are drained by `poll` from the UI thread. Only the latest
/// submission's result is surfaced.
pub struct AnalyzeClient {
    sender: Sender<AnalyzeEvent>,
    receiver: Receiver<AnalyzeEvent>,
    generation: u64,
}

impl AnalyzeClient {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            generation: 0,
        }
    }

    /// Sends the graph for analysis without blocking the UI thread
    pub fn submit(&mut self, endpoint: String, request: AnalyzeRequest) {
        self.generation += 1;
        let generation = self.generation;
        let sender = self.sender.clone();

        thread::spawn(move || {
            let result = post_analyze(&endpoint, &request);
            if let Err(err) = &result {
                warn!("pipeline analysis failed: {}", err);
            }
            // The UI may have shut down; a dead channel is fine.
            let _ = sender.send(AnalyzeEvent { generation, result });
        });
    }

    /// Drains finished submissions, returning the result of the latest
    /// one if it arrived. Responses from superseded submissions are
    /// dropped.
    pub fn poll(&mut self) -> Option<Result<AnalyzeSummary, AnalyzeError>> {
        let mut latest = None;
        while let Ok(event) = self.receiver.try_recv() {
            if event.generation == self.generation {
                latest = Some(event.result);
            } else {
                debug!(
                    "dropping stale analyze response (submission {} superseded by {})",
                    event.generation, self.generation
                );
            }
        }
        latest
    }
}

impl Default for AnalyzeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;
    use httpmock::prelude::*;
    use serde_json::json;

    fn sample_graph() -> PipelineGraph {
        let mut graph = PipelineGraph::new();
        let math = graph.create_node("MathNode", Pos2::new(10.0, 20.0)).unwrap();
        let logger = graph.create_node("LoggerNode", Pos2::new(300.0, 20.0)).unwrap();
        let output = graph.create_node("OutputNode", Pos2::new(600.0, 20.0)).unwrap();
        graph.connect(&math, "result", &logger, "data").unwrap();
        graph.connect(&logger, "logged", &output, "input").unwrap();
        graph
    }

    #[test]
    fn request_carries_every_node_and_edge() {
        let request = build_request(&sample_graph());
        assert_eq!(request.nodes.len(), 3);
        assert_eq!(request.edges.len(), 2);
    }

    #[test]
    fn wire_format_matches_the_analysis_contract() {
        let request = build_request(&sample_graph());
        let body = serde_json::to_value(&request).unwrap();

        let node = &body["nodes"][0];
        assert_eq!(node["id"], "MathNode-1");
        assert_eq!(node["type"], "MathNode");
        assert_eq!(node["position"]["x"], 10.0);
        assert_eq!(node["data"]["isExpanded"], true);
        assert_eq!(node["data"]["operation"], "add");
        assert_eq!(node["data"]["outputs"][0], "result");

        let edge = &body["edges"][0];
        assert_eq!(edge["source"], "MathNode-1");
        assert_eq!(edge["sourceHandle"], "result");
        assert_eq!(edge["target"], "LoggerNode-1");
        assert_eq!(edge["targetHandle"], "data");
    }

    #[test]
    fn successful_analysis_decodes_and_displays() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/pipelines/parse");
            then.status(200)
                .json_body(json!({"num_nodes": 3, "num_edges": 2, "is_dag": true, "status": "success"}));
        });

        let request = build_request(&sample_graph());
        let summary = post_analyze(&server.url("/pipelines/parse"), &request).unwrap();
        mock.assert();

        assert_eq!(summary.num_nodes.to_string(), "3");
        assert_eq!(summary.num_edges.to_string(), "2");
        assert_eq!(summary.dag_label(), "Yes");
    }

    #[test]
    fn cyclic_graph_reports_no() {
        let summary: AnalyzeSummary =
            serde_json::from_value(json!({"num_nodes": 2, "num_edges": 2, "is_dag": false}))
                .unwrap();
        assert_eq!(summary.dag_label(), "No");
    }

    #[test]
    fn server_error_surfaces_as_status_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/pipelines/parse");
            then.status(500);
        });

        let request = build_request(&sample_graph());
        let err = post_analyze(&server.url("/pipelines/parse"), &request).unwrap_err();
        assert!(matches!(err, AnalyzeError::Status(500)));
    }

    #[test]
    fn malformed_body_surfaces_as_decode_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/pipelines/parse");
            then.status(200).body("not json");
        });

        let request = build_request(&sample_graph());
        let err = post_analyze(&server.url("/pipelines/parse"), &request).unwrap_err();
        assert!(matches!(err, AnalyzeError::Decode(_)));
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut client = AnalyzeClient::new();

        // Simulate a first submission whose response arrives after a
        // second submission was sent.
        client.generation = 2;
        client
            .sender
            .send(AnalyzeEvent {
                generation: 1,
                result: Ok(AnalyzeSummary {
                    num_nodes: 1,
                    num_edges: 0,
                    is_dag: true,
                }),
            })
            .unwrap();
        assert!(client.poll().is_none());

        client
            .sender
            .send(AnalyzeEvent {
                generation: 2,
                result: Ok(AnalyzeSummary {
                    num_nodes: 5,
                    num_edges: 4,
                    is_dag: false,
                }),
            })
            .unwrap();
        let latest = client.poll().unwrap().unwrap();
        assert_eq!(latest.num_nodes, 5);
    }
}

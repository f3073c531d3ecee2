//! Neo4j connection client.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use neo4rs::{BoltType, ConfigBuilder, Graph, Query};
use scholargraph_core::{
    AccessMode, CypherQuery, GraphConfig, GraphError, GraphResult, Param, Record, Value,
};
use tracing::{debug, info};

use crate::session::GraphSession;

/// Client for Neo4j Knowledge Graph operations.
pub struct GraphClient {
    graph: Graph,
    database: String,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs builds its pool lazily, so a `RETURN 1` ping forces the bolt
    /// handshake here and connection problems surface before any real query.
    pub async fn connect(config: &GraphConfig) -> GraphResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::config(format!("Failed to build Neo4j config: {e}")))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| GraphError::connection(format!("Failed to create Neo4j connection pool: {e}")))?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| GraphError::connection(format!("Neo4j is not responding to queries: {e}")))?;

        info!(uri = %config.uri, database = %config.database, "Connected to Neo4j");
        Ok(Self {
            graph,
            database: config.database.clone(),
        })
    }
}

#[async_trait]
impl GraphSession for GraphClient {
    async fn run(&mut self, query: &CypherQuery, mode: AccessMode) -> GraphResult<Vec<Record>> {
        let text = query.text();
        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| classify(e, text))?;

        let mut stream = txn
            .execute(to_neo4j_query(query))
            .await
            .map_err(|e| classify(e, text))?;

        let mut records = Vec::new();
        while let Some(row) = stream
            .next(txn.handle())
            .await
            .map_err(|e| classify(e, text))?
        {
            records.push(row_to_record(&row)?);
        }

        // Read transactions never commit anything they might have touched.
        match mode {
            AccessMode::Write => txn.commit().await.map_err(|e| classify(e, text))?,
            AccessMode::Read => txn.rollback().await.map_err(|e| classify(e, text))?,
        }

        Ok(records)
    }

    async fn close(self) -> GraphResult<()> {
        debug!(database = %self.database, "Closing Neo4j connection pool");
        drop(self.graph);
        Ok(())
    }
}

/// Transport failures are fatal connection errors; everything else is
/// attributed to the query.
fn classify(err: neo4rs::Error, query: &str) -> GraphError {
    match err {
        neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError => {
            GraphError::connection(err.to_string())
        }
        other => GraphError::query(query, other.to_string()),
    }
}

pub(crate) fn to_neo4j_query(query: &CypherQuery) -> Query {
    query
        .params()
        .iter()
        .fold(Query::new(query.text().to_string()), |q, (key, value)| {
            q.param(key, param_to_bolt(value))
        })
}

pub(crate) fn param_to_bolt(param: &Param) -> BoltType {
    match param {
        Param::String(s) => BoltType::from(s.clone()),
        Param::Int(i) => BoltType::from(*i),
        Param::Float(f) => BoltType::from(*f),
        Param::Bool(b) => BoltType::from(*b),
        Param::StringList(items) => BoltType::from(items.clone()),
    }
}

fn row_to_record(row: &neo4rs::Row) -> GraphResult<Record> {
    let fields: HashMap<String, BoltType> = row.to().map_err(|e| GraphError::Decode {
        field: "<row>".to_string(),
        message: e.to_string(),
    })?;

    Ok(fields
        .into_iter()
        .map(|(alias, value)| (alias, bolt_to_value(value)))
        .collect())
}

fn bolt_map(map: neo4rs::BoltMap) -> BTreeMap<String, Value> {
    map.value
        .into_iter()
        .map(|(k, v)| (k.value, bolt_to_value(v)))
        .collect()
}

pub(crate) fn bolt_to_value(value: BoltType) -> Value {
    match value {
        BoltType::Null(_) => Value::Null,
        BoltType::Boolean(b) => Value::Bool(b.value),
        BoltType::Integer(i) => Value::Int(i.value),
        BoltType::Float(f) => Value::Float(f.value),
        BoltType::String(s) => Value::String(s.value),
        BoltType::List(list) => Value::List(list.value.into_iter().map(bolt_to_value).collect()),
        BoltType::Map(map) => Value::Map(bolt_map(map)),
        BoltType::Node(node) => Value::Node {
            id: node.id.value,
            labels: node
                .labels
                .value
                .into_iter()
                .filter_map(|label| match label {
                    BoltType::String(s) => Some(s.value),
                    _ => None,
                })
                .collect(),
            properties: bolt_map(node.properties),
        },
        BoltType::Relation(rel) => Value::Relationship {
            id: rel.id.value,
            start: rel.start_node_id.value,
            end: rel.end_node_id.value,
            rel_type: rel.typ.value,
            properties: bolt_map(rel.properties),
        },
        // Temporal, spatial and path values are shown as the driver prints them.
        other => Value::String(format!("{other:?}")),
    }
}

//! Graph view of a blueprint's main chain.
//!
//! The module list order defines the chain: connection `i` must link
//! `modules[i]` to `modules[i + 1]`. [`Chain`] loads a blueprint into a
//! directed graph and checks that contract, so both freshly assembled and
//! imported documents can be verified.

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use crate::{BlueprintModel, IdeaflowError, ModuleRole, Result};

#[derive(Debug, Clone)]
struct Step {
    id: String,
    name: String,
    role: ModuleRole,
}

/// Main chain of a blueprint as a directed graph.
#[derive(Debug, Clone)]
pub struct Chain {
    graph: DiGraph<Step, ()>,
    /// node indices in module list order
    order: Vec<NodeIndex>,
    error_id: String,
    error_role: ModuleRole,
}

impl Chain {
    /// Checks the simple-path invariant.
    ///
    /// - the first module is the only trigger, no module has the error role
    /// - the detached error handler has the error role
    /// - there are exactly `n - 1` connections
    /// - connection `i` runs from module `i` to module `i + 1`
    /// - every step has at most one incoming and one outgoing connection
    pub fn verify(&self) -> Result<()> {
        let graph = &self.graph;
        let n = self.order.len();

        if n == 0 {
            return Err(IdeaflowError::Chain("blueprint has no modules".to_string()));
        }
        if self.error_role != ModuleRole::Error {
            return Err(IdeaflowError::Chain(format!("error handler {} has position {}", self.error_id, self.error_role.as_ref())));
        }
        if graph[self.order[0]].role != ModuleRole::Trigger {
            return Err(IdeaflowError::Chain(format!("first module {} is not a trigger", graph[self.order[0]].id)));
        }
        for idx in self.order.iter().skip(1) {
            let step = &graph[*idx];
            if matches!(step.role, ModuleRole::Trigger | ModuleRole::Error) {
                return Err(IdeaflowError::Chain(format!("module {} cannot appear inside the chain as {}", step.id, step.role.as_ref())));
            }
        }

        if graph.edge_count() != n - 1 {
            return Err(IdeaflowError::Chain(format!("expected {} connections for {} modules, found {}", n - 1, n, graph.edge_count())));
        }

        for (i, pair) in self.order.windows(2).enumerate() {
            if graph.find_edge(pair[0], pair[1]).is_none() {
                return Err(IdeaflowError::Chain(format!(
                    "missing connection {} -> {} at position {}",
                    graph[pair[0]].id,
                    graph[pair[1]].id,
                    i
                )));
            }
        }

        for idx in graph.node_indices() {
            let incoming = graph.neighbors_directed(idx, Direction::Incoming).count();
            let outgoing = graph.neighbors_directed(idx, Direction::Outgoing).count();
            if incoming > 1 || outgoing > 1 {
                return Err(IdeaflowError::Chain(format!("module {} branches ({} in, {} out)", graph[idx].id, incoming, outgoing)));
            }
        }

        Ok(())
    }

    /// Number of steps in the chain.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Output a human-readable representation of the chain
    pub fn describe(&self) -> String {
        let graph = &self.graph;
        let mut lines = Vec::new();

        lines.push("=== Scenario Chain ===".to_string());
        lines.push(format!("Modules: {}, Connections: {}", graph.node_count(), graph.edge_count()));
        lines.push(String::new());

        lines.push("--- Modules ---".to_string());
        for idx in &self.order {
            let step = &graph[*idx];
            lines.push(format!("[{}] {} (position: {})", step.id, step.name, step.role.as_ref()));
        }
        lines.push(String::new());

        lines.push("--- Connections ---".to_string());
        for edge in graph.raw_edges() {
            lines.push(format!("{} --> {}", graph[edge.source()].id, graph[edge.target()].id));
        }
        lines.push(String::new());

        lines.push(format!("--- Error handler: {} ---", self.error_id));

        lines.join("\n")
    }
}

impl TryFrom<&BlueprintModel> for Chain {
    type Error = IdeaflowError;

    fn try_from(model: &BlueprintModel) -> Result<Self> {
        let mut graph: DiGraph<Step, ()> = DiGraph::new();
        let mut nodes = HashMap::new();
        let mut order = Vec::with_capacity(model.modules.len());

        for module in model.modules.iter() {
            if nodes.contains_key(&module.id) {
                return Err(IdeaflowError::Chain(format!("duplicate module id {}", module.id)));
            }
            let idx = graph.add_node(Step {
                id: module.id.clone(),
                name: module.name.clone(),
                role: module.position,
            });
            nodes.insert(module.id.clone(), idx);
            order.push(idx);
        }

        if nodes.contains_key(&model.error.id) {
            return Err(IdeaflowError::Chain(format!("error handler {} is part of the main chain", model.error.id)));
        }

        for connection in model.connections.iter() {
            let source = nodes.get(&connection.from).ok_or(IdeaflowError::Chain(format!("source module {} not found", connection.from)))?;
            let target = nodes.get(&connection.to).ok_or(IdeaflowError::Chain(format!("target module {} not found", connection.to)))?;
            graph.add_edge(*source, *target, ());
        }

        Ok(Self {
            graph,
            order,
            error_id: model.error.id.clone(),
            error_role: model.error.position,
        })
    }
}

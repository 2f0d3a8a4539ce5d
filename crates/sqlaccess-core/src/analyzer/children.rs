//! Direct child expressions and subqueries of an arbitrary AST node.
//!
//! The walker matches the node kinds it understands structurally. Everything
//! else (dialect-specific operators, `JSON_TABLE` and friends) is opened with
//! sqlparser's [`Visitor`] so no column reference beneath it goes unseen.

use sqlparser::ast::{Expr, Query, Visit, Visitor};
use std::ops::ControlFlow;

#[derive(Debug, Default)]
pub(crate) struct ChildNodes {
    pub(crate) exprs: Vec<Expr>,
    pub(crate) queries: Vec<Query>,
}

impl ChildNodes {
    /// Children of an expression, excluding the expression itself.
    pub(crate) fn of_expr(expr: &Expr) -> Self {
        Self::collect(expr, 0)
    }

    /// Top-level expressions and subqueries of a non-expression node.
    pub(crate) fn of_node<N: Visit>(node: &N) -> Self {
        Self::collect(node, 1)
    }

    fn collect<N: Visit>(node: &N, depth: usize) -> Self {
        let mut collector = Collector {
            children: ChildNodes::default(),
            depth,
            in_query: 0,
        };
        let _ = node.visit(&mut collector);
        collector.children
    }
}

/// `depth` counts enclosing expressions; a node is a direct child when it is
/// met at depth 1 outside any subquery.
struct Collector {
    children: ChildNodes,
    depth: usize,
    in_query: usize,
}

impl Visitor for Collector {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<()> {
        if self.in_query == 0 && self.depth == 1 {
            self.children.queries.push(query.clone());
        }
        self.in_query += 1;
        ControlFlow::Continue(())
    }

    fn post_visit_query(&mut self, _query: &Query) -> ControlFlow<()> {
        self.in_query -= 1;
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<()> {
        if self.in_query == 0 {
            if self.depth == 1 {
                self.children.exprs.push(expr.clone());
            }
            self.depth += 1;
        }
        ControlFlow::Continue(())
    }

    fn post_visit_expr(&mut self, _expr: &Expr) -> ControlFlow<()> {
        if self.in_query == 0 {
            self.depth -= 1;
        }
        ControlFlow::Continue(())
    }
}

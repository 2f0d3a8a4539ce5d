//! Structural walk over a statement, collecting raw column accesses.
//!
//! Each function matches one family of AST nodes and threads the current
//! [`ScopeState`] by mutable reference and the [`Frame`] by value. Nested
//! subqueries are handed to the subquery manager and never walked in the
//! enclosing scope.

use super::children::ChildNodes;
use super::helpers::{ident_value, object_name_parts, split_idents, split_object_name, BareColumn};
use super::scope::{Frame, ScopeState, DUAL_TABLE};
use super::Analyzer;
use crate::error::AnalyzeError;
use crate::types::StatementType;
use sqlparser::ast::{
    Assignment, AssignmentTarget, Distinct, Expr, FromTable, Function, FunctionArg,
    FunctionArgExpr, FunctionArgumentClause, FunctionArguments, GroupByExpr, HavingBound, Insert,
    JoinConstraint, JoinOperator, LambdaFunction, LimitClause, MergeAction, MergeInsertKind,
    NamedWindowExpr, ObjectName, OnConflictAction, OnInsert, OneOrManyWithParens, OrderByExpr,
    OrderByKind, Query, Select, SelectItem, SelectItemQualifiedWildcardKind, SetExpr, Statement,
    TableFactor, TableObject, TableWithJoins, UpdateTableFromKind, WindowFrameBound, WindowSpec,
    WindowType,
};

type WalkResult = Result<(), AnalyzeError>;

impl Analyzer {
    pub(super) fn walk_statement(
        &self,
        statement: &Statement,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        match statement {
            Statement::Query(query) => self.walk_query(query, scope, frame),
            Statement::Insert(insert) => {
                self.walk_insert(insert, scope, frame.enter(StatementType::Insert)?)
            }
            Statement::Update {
                table,
                assignments,
                from,
                selection,
                returning,
                limit,
                ..
            } => {
                let frame = frame.enter(StatementType::Update)?;
                self.walk_table_with_joins(table, scope, frame)?;
                if let Some(UpdateTableFromKind::BeforeSet(tables)) = from {
                    for table in tables {
                        self.walk_table_with_joins(table, scope, frame)?;
                    }
                }
                self.walk_assignments(assignments, scope, frame)?;
                if let Some(UpdateTableFromKind::AfterSet(tables)) = from {
                    for table in tables {
                        self.walk_table_with_joins(table, scope, frame)?;
                    }
                }
                self.walk_opt_expr(selection.as_ref(), scope, frame)?;
                if let Some(returning) = returning {
                    self.walk_select_items(returning, scope, frame)?;
                }
                self.walk_opt_expr(limit.as_ref(), scope, frame)
            }
            Statement::Delete(delete) => {
                let frame = frame.enter(StatementType::Delete)?;
                for name in &delete.tables {
                    self.record_relation(name, scope);
                }
                match &delete.from {
                    FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => {
                        for table in tables {
                            self.walk_table_with_joins(table, scope, frame)?;
                        }
                    }
                }
                if let Some(using) = &delete.using {
                    for table in using {
                        self.walk_table_with_joins(table, scope, frame)?;
                    }
                }
                self.walk_opt_expr(delete.selection.as_ref(), scope, frame)?;
                if let Some(returning) = &delete.returning {
                    self.walk_select_items(returning, scope, frame)?;
                }
                self.walk_order_by_exprs(&delete.order_by, scope, frame)?;
                self.walk_opt_expr(delete.limit.as_ref(), scope, frame)
            }
            Statement::CreateTable(create) => {
                let frame = frame.enter(StatementType::Create)?;
                self.record_relation(&create.name, scope);
                self.walk_bare_columns(&create.columns, scope, frame);
                match &create.query {
                    Some(query) => self.walk_query(query, scope, frame),
                    None => Ok(()),
                }
            }
            Statement::CreateView {
                name,
                columns,
                query,
                ..
            } => {
                let frame = frame.enter(StatementType::Create)?;
                self.record_relation(name, scope);
                self.walk_bare_columns(columns, scope, frame);
                self.walk_query(query, scope, frame)
            }
            Statement::Drop { names, .. } => {
                // DROP names tables only; there are no columns to type.
                for name in names {
                    self.record_relation(name, scope);
                }
                Ok(())
            }
            Statement::Merge {
                table,
                source,
                on,
                clauses,
                ..
            } => {
                let frame = frame.descend()?;
                self.walk_table_factor(table, scope, frame)?;
                self.walk_table_factor(source, scope, frame)?;
                self.walk_expr(on, scope, frame)?;
                for clause in clauses {
                    self.walk_opt_expr(clause.predicate.as_ref(), scope, frame)?;
                    match &clause.action {
                        MergeAction::Insert(insert) => {
                            self.walk_bare_columns(&insert.columns, scope, frame);
                            if let MergeInsertKind::Values(values) = &insert.kind {
                                for row in &values.rows {
                                    self.walk_exprs(row, scope, frame)?;
                                }
                            }
                        }
                        MergeAction::Update { assignments } => {
                            self.walk_assignments(assignments, scope, frame)?;
                        }
                        MergeAction::Delete => {}
                    }
                }
                Ok(())
            }
            // DDL other than CREATE/DROP, transaction control, SET, SHOW and the
            // like carry no column accesses.
            _ => Ok(()),
        }
    }

    fn walk_insert(&self, insert: &Insert, scope: &mut ScopeState, frame: Frame) -> WalkResult {
        if let TableObject::TableName(name) = &insert.table {
            self.record_relation(name, scope);
        }
        self.walk_bare_columns(&insert.columns, scope, frame);
        if let Some(source) = &insert.source {
            self.walk_query(source, scope, frame)?;
        }
        self.walk_assignments(&insert.assignments, scope, frame)?;
        if let Some(OnInsert::DuplicateKeyUpdate(assignments)) = &insert.on {
            self.walk_assignments(assignments, scope, frame)?;
        }
        if let Some(OnInsert::OnConflict(conflict)) = &insert.on {
            if let OnConflictAction::DoUpdate(update) = &conflict.action {
                self.walk_assignments(&update.assignments, scope, frame)?;
                self.walk_opt_expr(update.selection.as_ref(), scope, frame)?;
            }
        }
        match &insert.returning {
            Some(returning) => self.walk_select_items(returning, scope, frame),
            None => Ok(()),
        }
    }

    pub(super) fn walk_query(&self, query: &Query, scope: &mut ScopeState, frame: Frame) -> WalkResult {
        // Query-level ORDER BY and LIMIT belong to the SELECT they order.
        let frame = match query.body.as_ref() {
            SetExpr::Select(_) | SetExpr::SetOperation { .. } | SetExpr::Query(_) => {
                frame.enter(StatementType::Select)?
            }
            _ => frame.descend()?,
        };

        if let Some(with) = &query.with {
            for cte in &with.cte_tables {
                self.resolve_cte(cte, scope, frame)?;
            }
        }

        self.walk_set_expr(&query.body, scope, frame)?;

        if let Some(order_by) = &query.order_by {
            if let OrderByKind::Expressions(exprs) = &order_by.kind {
                self.walk_order_by_exprs(exprs, scope, frame)?;
            }
        }

        match &query.limit_clause {
            Some(LimitClause::LimitOffset {
                limit,
                offset,
                limit_by,
            }) => {
                self.walk_opt_expr(limit.as_ref(), scope, frame)?;
                if let Some(offset) = offset {
                    self.walk_expr(&offset.value, scope, frame)?;
                }
                self.walk_exprs(limit_by, scope, frame)?;
            }
            Some(LimitClause::OffsetCommaLimit { offset, limit }) => {
                self.walk_expr(offset, scope, frame)?;
                self.walk_expr(limit, scope, frame)?;
            }
            None => {}
        }

        match &query.fetch {
            Some(fetch) => self.walk_opt_expr(fetch.quantity.as_ref(), scope, frame),
            None => Ok(()),
        }
    }

    fn walk_set_expr(&self, body: &SetExpr, scope: &mut ScopeState, frame: Frame) -> WalkResult {
        match body {
            SetExpr::Select(select) => {
                self.walk_select(select, scope, frame.enter(StatementType::Select)?)
            }
            // A parenthesized operand shares the enclosing scope.
            SetExpr::Query(query) => self.walk_query(query, scope, frame),
            SetExpr::SetOperation { left, right, .. } => {
                let frame = frame.descend()?;
                self.walk_set_expr(left, scope, frame)?;
                self.walk_set_expr(right, scope, frame)
            }
            SetExpr::Values(values) => {
                let frame = frame.descend()?;
                for row in &values.rows {
                    self.walk_exprs(row, scope, frame)?;
                }
                Ok(())
            }
            SetExpr::Insert(statement)
            | SetExpr::Update(statement)
            | SetExpr::Delete(statement)
            | SetExpr::Merge(statement) => self.walk_statement(statement, scope, frame),
            SetExpr::Table(table) => {
                if let Some(name) = &table.table_name {
                    let name = self.case.fold(name);
                    scope.add_table(name.as_str());
                    scope.register_alias(name.as_str(), name.as_str());
                }
                Ok(())
            }
        }
    }

    fn walk_select(&self, select: &Select, scope: &mut ScopeState, frame: Frame) -> WalkResult {
        self.walk_select_items(&select.projection, scope, frame)?;

        if select.from.is_empty() {
            scope.add_table(DUAL_TABLE);
            scope.register_alias(DUAL_TABLE, DUAL_TABLE);
        }
        for table in &select.from {
            self.walk_table_with_joins(table, scope, frame)?;
        }

        self.walk_opt_expr(select.prewhere.as_ref(), scope, frame)?;
        self.walk_opt_expr(select.selection.as_ref(), scope, frame)?;
        if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
            self.walk_exprs(exprs, scope, frame)?;
        }
        self.walk_opt_expr(select.having.as_ref(), scope, frame)?;
        self.walk_opt_expr(select.qualify.as_ref(), scope, frame)?;

        if let Some(Distinct::On(exprs)) = &select.distinct {
            self.walk_exprs(exprs, scope, frame)?;
        }
        for named_window in &select.named_window {
            if let NamedWindowExpr::WindowSpec(spec) = &named_window.1 {
                self.walk_window_spec(spec, scope, frame)?;
            }
        }
        self.walk_exprs(&select.cluster_by, scope, frame)?;
        self.walk_exprs(&select.distribute_by, scope, frame)?;
        self.walk_order_by_exprs(&select.sort_by, scope, frame)?;
        for lateral_view in &select.lateral_views {
            self.walk_expr(&lateral_view.lateral_view, scope, frame)?;
        }
        if let Some(connect_by) = &select.connect_by {
            self.walk_expr(&connect_by.condition, scope, frame)?;
            self.walk_exprs(&connect_by.relationships, scope, frame)?;
        }
        Ok(())
    }

    fn walk_select_items(
        &self,
        items: &[SelectItem],
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        for item in items {
            match item {
                SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
                    self.walk_expr(expr, scope, frame)?;
                }
                SelectItem::Wildcard(_) => scope.push_column("", "*", frame.statement_type),
                SelectItem::QualifiedWildcard(kind, _) => match kind {
                    SelectItemQualifiedWildcardKind::ObjectName(name) => {
                        self.record_star(name, scope, frame);
                    }
                    SelectItemQualifiedWildcardKind::Expr(expr) => {
                        self.walk_expr(expr, scope, frame)?;
                    }
                },
            }
        }
        Ok(())
    }

    fn walk_table_with_joins(
        &self,
        table: &TableWithJoins,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        let frame = frame.descend()?;
        self.walk_table_factor(&table.relation, scope, frame)?;
        for join in &table.joins {
            self.walk_table_factor(&join.relation, scope, frame)?;
            self.walk_join_operator(&join.join_operator, scope, frame)?;
        }
        Ok(())
    }

    fn walk_join_operator(
        &self,
        operator: &JoinOperator,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        let constraint = match operator {
            JoinOperator::Join(c)
            | JoinOperator::Inner(c)
            | JoinOperator::Left(c)
            | JoinOperator::LeftOuter(c)
            | JoinOperator::Right(c)
            | JoinOperator::RightOuter(c)
            | JoinOperator::FullOuter(c)
            | JoinOperator::CrossJoin(c)
            | JoinOperator::Semi(c)
            | JoinOperator::LeftSemi(c)
            | JoinOperator::RightSemi(c)
            | JoinOperator::Anti(c)
            | JoinOperator::LeftAnti(c)
            | JoinOperator::RightAnti(c)
            | JoinOperator::StraightJoin(c) => c,
            JoinOperator::AsOf {
                match_condition,
                constraint,
            } => {
                self.walk_expr(match_condition, scope, frame)?;
                constraint
            }
            JoinOperator::CrossApply | JoinOperator::OuterApply => return Ok(()),
        };
        match constraint {
            JoinConstraint::On(expr) => self.walk_expr(expr, scope, frame),
            JoinConstraint::Using(columns) => {
                self.walk_bare_columns(columns, scope, frame);
                Ok(())
            }
            JoinConstraint::Natural | JoinConstraint::None => Ok(()),
        }
    }

    fn walk_table_factor(
        &self,
        factor: &TableFactor,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        let frame = frame.descend()?;
        match factor {
            TableFactor::Table { name, alias, .. } => {
                let alias = alias
                    .as_ref()
                    .map(|alias| ident_value(&alias.name, self.case))
                    .unwrap_or_default();
                let parts = object_name_parts(name, self.case);
                if let [single] = parts.as_slice() {
                    if let Some(columns) = scope.cte(single).cloned() {
                        let qualifier = if alias.is_empty() { single } else { &alias };
                        self.reference_cte(single, qualifier, &columns, scope);
                        return Ok(());
                    }
                }

                let Some(table) = parts.last() else {
                    return Ok(());
                };
                scope.add_table(table.as_str());
                if alias.is_empty() {
                    scope.register_alias(table.as_str(), table.as_str());
                } else {
                    scope.register_alias(alias, table.as_str());
                }
                Ok(())
            }
            TableFactor::Derived {
                subquery, alias, ..
            } => {
                let alias = alias
                    .as_ref()
                    .map(|alias| ident_value(&alias.name, self.case))
                    .unwrap_or_default();
                self.resolve_subquery(subquery, &alias, scope, frame)
                    .map(|_| ())
            }
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => self.walk_table_with_joins(table_with_joins, scope, frame),
            TableFactor::Pivot { table, .. }
            | TableFactor::Unpivot { table, .. }
            | TableFactor::MatchRecognize { table, .. } => {
                self.walk_table_factor(table, scope, frame)
            }
            TableFactor::TableFunction { expr, .. } => self.walk_expr(expr, scope, frame),
            TableFactor::Function { args, .. } => {
                for arg in args {
                    self.walk_function_arg(arg, scope, frame)?;
                }
                Ok(())
            }
            TableFactor::UNNEST { array_exprs, .. } => self.walk_exprs(array_exprs, scope, frame),
            other => self.walk_children(ChildNodes::of_node(other), scope, frame),
        }
    }

    fn walk_assignments(
        &self,
        assignments: &[Assignment],
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        for assignment in assignments {
            match &assignment.target {
                AssignmentTarget::ColumnName(name) => self.record_column(name, scope, frame),
                AssignmentTarget::Tuple(names) => {
                    for name in names {
                        self.record_column(name, scope, frame);
                    }
                }
            }
            self.walk_expr(&assignment.value, scope, frame)?;
        }
        Ok(())
    }

    pub(super) fn walk_expr(&self, expr: &Expr, scope: &mut ScopeState, frame: Frame) -> WalkResult {
        let frame = frame.descend()?;
        match expr {
            Expr::Identifier(ident) => {
                scope.push_column("", ident_value(ident, self.case), frame.statement_type);
                Ok(())
            }
            Expr::CompoundIdentifier(idents) => {
                let (qualifier, column) = split_idents(idents, self.case);
                scope.push_column(qualifier, column, frame.statement_type);
                Ok(())
            }
            Expr::Wildcard(_) => {
                scope.push_column("", "*", frame.statement_type);
                Ok(())
            }
            Expr::QualifiedWildcard(name, _) => {
                self.record_star(name, scope, frame);
                Ok(())
            }
            Expr::Subquery(query) => self.resolve_subquery(query, "", scope, frame).map(|_| ()),
            Expr::Exists { subquery, .. } => {
                self.resolve_subquery(subquery, "", scope, frame).map(|_| ())
            }
            Expr::InSubquery { expr, subquery, .. } => {
                self.walk_expr(expr, scope, frame)?;
                self.resolve_subquery(subquery, "", scope, frame).map(|_| ())
            }
            Expr::Function(function) => self.walk_function(function, scope, frame),
            Expr::BinaryOp { left, right, .. }
            | Expr::AnyOp { left, right, .. }
            | Expr::AllOp { left, right, .. }
            | Expr::IsDistinctFrom(left, right)
            | Expr::IsNotDistinctFrom(left, right) => {
                self.walk_expr(left, scope, frame)?;
                self.walk_expr(right, scope, frame)
            }
            Expr::Like { expr, pattern, .. }
            | Expr::ILike { expr, pattern, .. }
            | Expr::SimilarTo { expr, pattern, .. }
            | Expr::RLike { expr, pattern, .. } => {
                self.walk_expr(expr, scope, frame)?;
                self.walk_expr(pattern, scope, frame)
            }
            Expr::UnaryOp { expr, .. }
            | Expr::Nested(expr)
            | Expr::IsNull(expr)
            | Expr::IsNotNull(expr)
            | Expr::IsTrue(expr)
            | Expr::IsNotTrue(expr)
            | Expr::IsFalse(expr)
            | Expr::IsNotFalse(expr)
            | Expr::IsUnknown(expr)
            | Expr::IsNotUnknown(expr)
            | Expr::Cast { expr, .. }
            | Expr::Convert { expr, .. }
            | Expr::Collate { expr, .. }
            | Expr::Extract { expr, .. }
            | Expr::Ceil { expr, .. }
            | Expr::Floor { expr, .. }
            | Expr::Named { expr, .. } => self.walk_expr(expr, scope, frame),
            Expr::CompoundFieldAccess { root, .. } => self.walk_expr(root, scope, frame),
            Expr::JsonAccess { value, .. } => self.walk_expr(value, scope, frame),
            Expr::AtTimeZone {
                timestamp,
                time_zone,
                ..
            } => {
                self.walk_expr(timestamp, scope, frame)?;
                self.walk_expr(time_zone, scope, frame)
            }
            Expr::Between {
                expr, low, high, ..
            } => {
                self.walk_expr(expr, scope, frame)?;
                self.walk_expr(low, scope, frame)?;
                self.walk_expr(high, scope, frame)
            }
            Expr::InList { expr, list, .. } => {
                self.walk_expr(expr, scope, frame)?;
                self.walk_exprs(list, scope, frame)
            }
            Expr::InUnnest {
                expr, array_expr, ..
            } => {
                self.walk_expr(expr, scope, frame)?;
                self.walk_expr(array_expr, scope, frame)
            }
            Expr::Position { expr, r#in, .. } => {
                self.walk_expr(expr, scope, frame)?;
                self.walk_expr(r#in, scope, frame)
            }
            Expr::Substring {
                expr,
                substring_from,
                substring_for,
                ..
            } => {
                self.walk_expr(expr, scope, frame)?;
                self.walk_opt_expr(substring_from.as_deref(), scope, frame)?;
                self.walk_opt_expr(substring_for.as_deref(), scope, frame)
            }
            Expr::Trim {
                expr,
                trim_what,
                trim_characters,
                ..
            } => {
                self.walk_expr(expr, scope, frame)?;
                self.walk_opt_expr(trim_what.as_deref(), scope, frame)?;
                match trim_characters {
                    Some(characters) => self.walk_exprs(characters, scope, frame),
                    None => Ok(()),
                }
            }
            Expr::Overlay {
                expr,
                overlay_what,
                overlay_from,
                overlay_for,
                ..
            } => {
                self.walk_expr(expr, scope, frame)?;
                self.walk_expr(overlay_what, scope, frame)?;
                self.walk_expr(overlay_from, scope, frame)?;
                self.walk_opt_expr(overlay_for.as_deref(), scope, frame)
            }
            Expr::Case {
                operand,
                conditions,
                else_result,
                ..
            } => {
                self.walk_opt_expr(operand.as_deref(), scope, frame)?;
                for case_when in conditions {
                    self.walk_expr(&case_when.condition, scope, frame)?;
                    self.walk_expr(&case_when.result, scope, frame)?;
                }
                self.walk_opt_expr(else_result.as_deref(), scope, frame)
            }
            Expr::Tuple(exprs) => self.walk_exprs(exprs, scope, frame),
            Expr::Struct { values, .. } => self.walk_exprs(values, scope, frame),
            Expr::Array(array) => self.walk_exprs(&array.elem, scope, frame),
            Expr::Interval(interval) => self.walk_expr(&interval.value, scope, frame),
            Expr::GroupingSets(sets) | Expr::Cube(sets) | Expr::Rollup(sets) => {
                for set in sets {
                    self.walk_exprs(set, scope, frame)?;
                }
                Ok(())
            }
            Expr::Lambda(lambda) => self.walk_lambda(lambda, scope, frame),
            // Literals and dialect-specific forms: walk whatever they contain.
            other => self.walk_children(ChildNodes::of_expr(other), scope, frame),
        }
    }

    /// Walks a lambda body. Its parameters are bound locally and are not
    /// column accesses.
    fn walk_lambda(
        &self,
        lambda: &LambdaFunction,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        let params: Vec<String> = match &lambda.params {
            OneOrManyWithParens::One(param) => vec![ident_value(param, self.case)],
            OneOrManyWithParens::Many(params) => params
                .iter()
                .map(|param| ident_value(param, self.case))
                .collect(),
        };
        let mark = scope.columns.len();
        self.walk_expr(&lambda.body, scope, frame)?;
        let body = scope.columns.split_off(mark);
        scope.columns.extend(
            body.into_iter()
                .filter(|access| !(access.table.is_empty() && params.contains(&access.column))),
        );
        Ok(())
    }

    fn walk_children(
        &self,
        children: ChildNodes,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        self.walk_exprs(&children.exprs, scope, frame)?;
        for query in &children.queries {
            self.resolve_subquery(query, "", scope, frame)?;
        }
        Ok(())
    }

    fn walk_function(
        &self,
        function: &Function,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        match &function.args {
            FunctionArguments::List(list) => {
                for arg in &list.args {
                    self.walk_function_arg(arg, scope, frame)?;
                }
                for clause in &list.clauses {
                    match clause {
                        FunctionArgumentClause::OrderBy(exprs) => {
                            self.walk_order_by_exprs(exprs, scope, frame)?;
                        }
                        FunctionArgumentClause::Limit(expr)
                        | FunctionArgumentClause::Having(HavingBound(_, expr)) => {
                            self.walk_expr(expr, scope, frame)?;
                        }
                        other => self.walk_children(ChildNodes::of_node(other), scope, frame)?,
                    }
                }
            }
            FunctionArguments::Subquery(query) => {
                self.resolve_subquery(query, "", scope, frame)?;
            }
            FunctionArguments::None => {}
        }

        self.walk_opt_expr(function.filter.as_deref(), scope, frame)?;
        if let Some(WindowType::WindowSpec(spec)) = &function.over {
            self.walk_window_spec(spec, scope, frame)?;
        }
        self.walk_order_by_exprs(&function.within_group, scope, frame)
    }

    fn walk_window_spec(
        &self,
        spec: &WindowSpec,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        self.walk_exprs(&spec.partition_by, scope, frame)?;
        self.walk_order_by_exprs(&spec.order_by, scope, frame)?;
        if let Some(window_frame) = &spec.window_frame {
            let bounds = std::iter::once(&window_frame.start_bound).chain(&window_frame.end_bound);
            for bound in bounds {
                match bound {
                    WindowFrameBound::Preceding(offset) | WindowFrameBound::Following(offset) => {
                        self.walk_opt_expr(offset.as_deref(), scope, frame)?;
                    }
                    WindowFrameBound::CurrentRow => {}
                }
            }
        }
        Ok(())
    }

    fn walk_function_arg(
        &self,
        arg: &FunctionArg,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        let arg = match arg {
            FunctionArg::Unnamed(arg)
            | FunctionArg::Named { arg, .. }
            | FunctionArg::ExprNamed { arg, .. } => arg,
        };
        match arg {
            FunctionArgExpr::Expr(expr) => self.walk_expr(expr, scope, frame),
            FunctionArgExpr::Wildcard => {
                scope.push_column("", "*", frame.statement_type);
                Ok(())
            }
            FunctionArgExpr::QualifiedWildcard(name) => {
                self.record_star(name, scope, frame);
                Ok(())
            }
        }
    }

    fn walk_order_by_exprs(
        &self,
        exprs: &[OrderByExpr],
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        for order_by in exprs {
            self.walk_expr(&order_by.expr, scope, frame)?;
        }
        Ok(())
    }

    fn walk_exprs(&self, exprs: &[Expr], scope: &mut ScopeState, frame: Frame) -> WalkResult {
        for expr in exprs {
            self.walk_expr(expr, scope, frame)?;
        }
        Ok(())
    }

    fn walk_opt_expr(
        &self,
        expr: Option<&Expr>,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> WalkResult {
        match expr {
            Some(expr) => self.walk_expr(expr, scope, frame),
            None => Ok(()),
        }
    }

    /// Records column names that appear as plain identifiers rather than
    /// expressions. Empty names are skipped.
    fn walk_bare_columns<C: BareColumn>(&self, columns: &[C], scope: &mut ScopeState, frame: Frame) {
        for column in columns {
            let name = column.bare_column(self.case);
            if !name.is_empty() {
                scope.push_column("", name, frame.statement_type);
            }
        }
    }

    /// Records a table named outside any alias position (`INSERT INTO`,
    /// `DELETE t FROM`, `CREATE`, `DROP`). The schema part, or the table itself,
    /// becomes its qualifier.
    fn record_relation(&self, name: &ObjectName, scope: &mut ScopeState) {
        let (qualifier, table) = split_object_name(name, self.case);
        if table.is_empty() {
            return;
        }
        let qualifier = if qualifier.is_empty() {
            table.clone()
        } else {
            qualifier
        };
        scope.add_table(table.as_str());
        scope.register_alias(qualifier, table);
    }

    /// Records an assignment target such as `SET t.col = ...`.
    fn record_column(&self, name: &ObjectName, scope: &mut ScopeState, frame: Frame) {
        let (qualifier, column) = split_object_name(name, self.case);
        if !column.is_empty() {
            scope.push_column(qualifier, column, frame.statement_type);
        }
    }

    /// Records `q.*`, qualified by the last part of `q`.
    fn record_star(&self, name: &ObjectName, scope: &mut ScopeState, frame: Frame) {
        let (_, qualifier) = split_object_name(name, self.case);
        scope.push_column(qualifier, "*", frame.statement_type);
    }
}

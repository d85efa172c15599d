//! Filter translation
//!
//! Structural recursion over the query AST producing a `CompiledFilter`:
//! the rendered predicate text with `?` placeholders and its ordered
//! parameter list, plus an evaluable form bound to the generation's filter
//! dictionaries.
//!
//! Joiner semantics: within a group, surviving clauses are parenthesized
//! and joined `AND` (required), `AND NOT` (prohibited), or `OR` (optional);
//! the first surviving clause takes no joiner, or a leading `NOT` when
//! prohibited. `AND` binds tighter than `OR`.

use super::query::{FilterQuery, Occur};
use crate::observe::Logger;
use crate::store::{Generation, Heading};

/// Evaluable predicate node. A term on a known field whose value is absent
/// from the dictionary matches nothing, mirroring an empty sub-select.
#[derive(Debug, Clone)]
enum Pred {
    Always,
    Linked(Option<u32>),
    Group(Vec<(Occur, Pred)>),
}

/// A filter query lowered against one generation
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    expression: String,
    params: Vec<String>,
    pred: Pred,
}

impl CompiledFilter {
    /// Rendered predicate text with `?` placeholders
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Parameter values in placeholder order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Does `heading` satisfy this predicate within `gen`?
    pub fn matches(&self, heading: &Heading, gen: &Generation) -> bool {
        eval(&self.pred, heading.id, gen)
    }
}

fn eval(pred: &Pred, heading_id: u32, gen: &Generation) -> bool {
    match pred {
        Pred::Always => true,
        Pred::Linked(None) => false,
        Pred::Linked(Some(value_id)) => gen
            .linked_headings(*value_id)
            .map_or(false, |ids| ids.contains(&heading_id)),
        Pred::Group(clauses) => {
            // OR binds loosest: fold AND-chains, OR starts a new chain
            let mut any = false;
            let mut chain: Option<bool> = None;

            for (occur, sub) in clauses {
                let v = eval(sub, heading_id, gen);
                chain = Some(match (chain, occur) {
                    (None, Occur::Prohibited) => !v,
                    (None, _) => v,
                    (Some(c), Occur::Required) => c && v,
                    (Some(c), Occur::Prohibited) => c && !v,
                    (Some(c), Occur::Optional) => {
                        any = any || c;
                        v
                    }
                });
            }

            any || chain.unwrap_or(false)
        }
    }
}

/// Lower a boolean query against one generation's filter dictionaries.
///
/// Returns `None` when nothing is translatable (empty query, or every
/// clause dropped): callers treat that as "no predicate".
pub fn translate(query: &FilterQuery, gen: &Generation) -> Option<CompiledFilter> {
    let (expression, params, pred) = lower(query, gen)?;
    Some(CompiledFilter {
        expression,
        params,
        pred,
    })
}

fn lower(query: &FilterQuery, gen: &Generation) -> Option<(String, Vec<String>, Pred)> {
    match query {
        FilterQuery::MatchAll => Some(("1=1".to_string(), Vec::new(), Pred::Always)),

        FilterQuery::Term { field, value } => {
            let type_id = match gen.filter_type_id(field) {
                Some(id) => id,
                None => {
                    Logger::info("UNKNOWN_FILTER_FIELD", &[("field", field)]);
                    return None;
                }
            };

            let expression = format!(
                "id in (select heading_id from filter_link where filter_value_id in \
                 (select id from filter_value where type_id={} and value=?))",
                type_id
            );
            let pred = Pred::Linked(gen.filter_value_id(type_id, value));
            Some((expression, vec![value.clone()], pred))
        }

        FilterQuery::Group(clauses) => {
            let mut expression = String::new();
            let mut params = Vec::new();
            let mut preds = Vec::new();

            for clause in clauses {
                let (sub_expr, sub_params, sub_pred) = match lower(&clause.query, gen) {
                    Some(lowered) => lowered,
                    None => continue,
                };

                if expression.is_empty() {
                    if clause.occur == Occur::Prohibited {
                        expression.push_str("NOT ");
                    }
                } else {
                    expression.push_str(match clause.occur {
                        Occur::Required => " AND ",
                        Occur::Prohibited => " AND NOT ",
                        Occur::Optional => " OR ",
                    });
                }

                expression.push('(');
                expression.push_str(&sub_expr);
                expression.push(')');
                params.extend(sub_params);
                preds.push((clause.occur, sub_pred));
            }

            if expression.is_empty() {
                return None;
            }

            Some((expression, params, Pred::Group(preds)))
        }
    }
}

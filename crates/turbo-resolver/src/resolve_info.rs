//! Requested-field introspection for GraphQL operations.
//!
//! Resolvers use [`ResolveInfo`] to find out which fields a client selected
//! below a given point in the operation, so that expensive lookups can be
//! skipped when their output would be discarded anyway.

use std::collections::{BTreeSet, HashMap};

use graphql_parser::query::{
    parse_query, Definition, Field, FragmentDefinition, OperationDefinition, Selection,
    SelectionSet,
};

use crate::error::{ResolverError, ResolverResult};

type OwnedSelectionSet = SelectionSet<'static, String>;
type OwnedField = Field<'static, String>;

/// The selected operation of a parsed GraphQL document.
#[derive(Debug, Clone)]
pub struct ResolveInfo {
    operation_name: Option<String>,
    selection_set: OwnedSelectionSet,
    fragments: HashMap<String, FragmentDefinition<'static, String>>,
}

impl ResolveInfo {
    /// Parse a document containing exactly one operation.
    pub fn parse(query: &str) -> ResolverResult<Self> {
        Self::parse_operation(query, None)
    }

    /// Parse a document and select an operation by name.
    ///
    /// Without a name the document must contain a single operation.
    pub fn parse_operation(query: &str, operation_name: Option<&str>) -> ResolverResult<Self> {
        let document = parse_query::<String>(query)?.into_static();

        let mut operations = Vec::new();
        let mut fragments = HashMap::new();
        for definition in document.definitions {
            match definition {
                Definition::Operation(operation) => operations.push(split_operation(operation)),
                Definition::Fragment(fragment) => {
                    fragments.insert(fragment.name.clone(), fragment);
                }
            }
        }

        let (operation_name, selection_set) = match operation_name {
            Some(wanted) => operations
                .into_iter()
                .find(|(name, _)| name.as_deref() == Some(wanted))
                .ok_or_else(|| ResolverError::UnknownOperation(wanted.to_string()))?,
            None => match operations.len() {
                0 => return Err(ResolverError::NoOperation),
                1 => operations.remove(0),
                n => return Err(ResolverError::AmbiguousOperation(n)),
            },
        };

        Ok(Self {
            operation_name,
            selection_set,
            fragments,
        })
    }

    /// Name of the selected operation, if it has one.
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Field names selected on the node reached by `path`.
    ///
    /// `path` is a `/`-separated list of field names starting at the operation
    /// root, e.g. `products/items`. Aliases are ignored and fragments are
    /// expanded. A path that matches no field yields an empty set.
    pub fn requested_fields(&self, path: &str) -> ResolverResult<BTreeSet<String>> {
        let mut sets: Vec<&OwnedSelectionSet> = vec![&self.selection_set];

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let mut next = Vec::new();
            for set in sets {
                self.visit_fields(set, &mut Vec::new(), &mut |field| {
                    if field.name == segment {
                        next.push(&field.selection_set);
                    }
                })?;
            }
            sets = next;
            if sets.is_empty() {
                break;
            }
        }

        let mut names = BTreeSet::new();
        for set in sets {
            self.visit_fields(set, &mut Vec::new(), &mut |field| {
                names.insert(field.name.clone());
            })?;
        }
        Ok(names)
    }

    /// Check whether `field` is selected on the node reached by `path`.
    pub fn is_requested(&self, path: &str, field: &str) -> ResolverResult<bool> {
        Ok(self.requested_fields(path)?.contains(field))
    }

    fn visit_fields<'s>(
        &'s self,
        set: &'s OwnedSelectionSet,
        visiting: &mut Vec<&'s str>,
        visit: &mut dyn FnMut(&'s OwnedField),
    ) -> ResolverResult<()> {
        for selection in &set.items {
            match selection {
                Selection::Field(field) => visit(field),
                Selection::InlineFragment(fragment) => {
                    self.visit_fields(&fragment.selection_set, visiting, visit)?;
                }
                Selection::FragmentSpread(spread) => {
                    let name = spread.fragment_name.as_str();
                    if visiting.contains(&name) {
                        return Err(ResolverError::FragmentCycle(name.to_string()));
                    }
                    let fragment = self
                        .fragments
                        .get(name)
                        .ok_or_else(|| ResolverError::UnknownFragment(name.to_string()))?;

                    visiting.push(name);
                    self.visit_fields(&fragment.selection_set, visiting, visit)?;
                    visiting.pop();
                }
            }
        }
        Ok(())
    }
}

fn split_operation(
    operation: OperationDefinition<'static, String>,
) -> (Option<String>, OwnedSelectionSet) {
    match operation {
        OperationDefinition::SelectionSet(set) => (None, set),
        OperationDefinition::Query(query) => (query.name, query.selection_set),
        OperationDefinition::Mutation(mutation) => (mutation.name, mutation.selection_set),
        OperationDefinition::Subscription(subscription) => {
            (subscription.name, subscription.selection_set)
        }
    }
}

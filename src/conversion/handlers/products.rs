use super::{guard, non_empty, Handler};
use crate::conversion::domain::csaf::{
    Branch, FullProductName, ProductGroup, ProductIdentificationHelper, ProductTree, Relationship,
};
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{Diagnostics, Fragment};
use crate::conversion::policies::dialect::{BRANCH_TYPE, LEGACY_BRANCH_TYPES, RELATION_TYPE};
use crate::shared::error::StructureError;
use roxmltree::Node;

/// `/product_tree` from `ProductTree`
pub struct Products {
    record: ProductTree,
    diagnostics: Diagnostics,
}

impl Products {
    /// Maximum branch nesting followed before giving up on a subtree
    const MAX_BRANCH_DEPTH: usize = 100;

    pub fn new() -> Self {
        Self {
            record: ProductTree::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn relationships(&mut self, node: Node<'_, '_>) -> Result<Vec<Relationship>, StructureError> {
        let mut relationships = Vec::new();
        for entry in cvrf::children(node, "Relationship") {
            let names = cvrf::children(entry, "FullProductName");
            let first = names.first().ok_or_else(|| StructureError::MissingElement {
                parent: cvrf::tag(entry).to_string(),
                child: "FullProductName",
            })?;
            if names.len() > 1 {
                self.diagnostics.warning(format!(
                    "Input line {}: Relationship contains more FullProductNames. \
                     Taking only the first one, since CSAF expects only 1 value here",
                    cvrf::line(entry)
                ));
            }

            let relation_type = cvrf::require_attribute(entry, "RelationType")?;
            let category = RELATION_TYPE.translate(relation_type).map(str::to_string);
            if category.is_none() {
                self.diagnostics.error(format!(
                    "unknown relationship type {} at input line {}, omitting category",
                    relation_type,
                    cvrf::line(entry)
                ));
            }

            relationships.push(Relationship {
                category,
                full_product_name: full_product_name(*first)?,
                product_reference: cvrf::require_attribute(entry, "ProductReference")?.to_string(),
                relates_to_product_reference: cvrf::require_attribute(
                    entry,
                    "RelatesToProductReference",
                )?
                .to_string(),
            });
        }
        Ok(relationships)
    }

    /// Child branches of `node`; branches without content are left out
    ///
    /// A malformed branch is recorded as an ERROR and dropped on its own,
    /// its siblings are kept.
    fn branches(&mut self, node: Node<'_, '_>, depth: usize) -> Vec<Branch> {
        let mut branches = Vec::new();
        for entry in cvrf::children(node, "Branch") {
            let field = format!("branch at input line {}", cvrf::line(entry));
            let branch = self.branch(entry, depth);
            if let Some(Some(branch)) = guard(&mut self.diagnostics, &field, branch) {
                branches.push(branch);
            }
        }
        branches
    }

    fn branch(&mut self, node: Node<'_, '_>, depth: usize) -> Result<Option<Branch>, StructureError> {
        if depth >= Self::MAX_BRANCH_DEPTH {
            self.diagnostics.error(format!(
                "branch nesting at input line {} exceeds {} levels, skipping subtree",
                cvrf::line(node),
                Self::MAX_BRANCH_DEPTH
            ));
            return Ok(None);
        }

        let name = cvrf::require_attribute(node, "Name")?.to_string();
        let category = self.branch_category(node)?;

        if let Some(product) = cvrf::child(node, "FullProductName") {
            return Ok(Some(Branch {
                branches: None,
                category,
                name,
                product: Some(full_product_name(product)?),
            }));
        }

        let branches = self.branches(node, depth + 1);
        if branches.is_empty() {
            return Ok(None);
        }
        Ok(Some(Branch {
            branches: Some(branches),
            category,
            name,
            product: None,
        }))
    }

    fn branch_category(&mut self, node: Node<'_, '_>) -> Result<Option<String>, StructureError> {
        let branch_type = cvrf::require_attribute(node, "Type")?;
        if LEGACY_BRANCH_TYPES.contains(&branch_type) {
            self.diagnostics.warning(format!(
                "Input branch type {} is no longer supported in CSAF. Converting to product_name",
                branch_type
            ));
        }
        let category = BRANCH_TYPE.translate(branch_type).map(str::to_string);
        if category.is_none() {
            self.diagnostics.error(format!(
                "unknown branch type {} at input line {}, omitting category",
                branch_type,
                cvrf::line(node)
            ));
        }
        Ok(category)
    }
}

impl Default for Products {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for Products {
    fn always(&mut self, _node: Node<'_, '_>) -> Result<(), StructureError> {
        Ok(())
    }

    fn sometimes(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        let names = cvrf::children(node, "FullProductName")
            .into_iter()
            .map(full_product_name)
            .collect::<Result<Vec<_>, _>>();
        self.record.full_product_names =
            guard(&mut self.diagnostics, "full_product_names", names).and_then(non_empty);

        let relationships = self.relationships(node);
        self.record.relationships =
            guard(&mut self.diagnostics, "relationships", relationships).and_then(non_empty);

        let groups = product_groups(node);
        self.record.product_groups =
            guard(&mut self.diagnostics, "product_groups", groups).and_then(non_empty);

        self.record.branches = non_empty(self.branches(node, 0));
        Ok(())
    }

    fn dump(&self) -> serde_json::Result<Fragment> {
        Fragment::serialized(&["product_tree"], &self.record)
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}

fn full_product_name(node: Node<'_, '_>) -> Result<FullProductName, StructureError> {
    Ok(FullProductName {
        name: cvrf::require_text(node)?,
        product_id: cvrf::require_attribute(node, "ProductID")?.to_string(),
        product_identification_helper: node
            .attribute("CPE")
            .filter(|cpe| !cpe.is_empty())
            .map(|cpe| ProductIdentificationHelper {
                cpe: cpe.to_string(),
            }),
    })
}

fn product_groups(node: Node<'_, '_>) -> Result<Vec<ProductGroup>, StructureError> {
    let Some(groups) = cvrf::child(node, "ProductGroups") else {
        return Ok(Vec::new());
    };
    cvrf::children(groups, "Group")
        .into_iter()
        .map(|group| {
            Ok(ProductGroup {
                group_id: cvrf::require_attribute(group, "GroupID")?.to_string(),
                product_ids: cvrf::children_texts(group, "ProductID"),
                summary: cvrf::child_text(group, "Description"),
            })
        })
        .collect()
}

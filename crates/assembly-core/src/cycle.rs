//! Detection of loops in the `basis.assembly` chain

use assembly_model::ReleasesDocument;

use crate::error::{Error, Result};

/// Names of the assemblies from `assembly` up to its root ancestor.
///
/// The walk stops at an assembly without a `basis.assembly`, or at a name
/// the document does not define. Returns `Error::AssemblyCycle` as soon as
/// a name shows up twice. Unstructured documents yield an empty chain.
pub fn assembly_chain(releases: &ReleasesDocument, assembly: &str) -> Result<Vec<String>> {
    let mut visited: Vec<String> = Vec::new();
    if !releases.is_structured() {
        return Ok(visited);
    }

    let mut next = Some(assembly).filter(|name| !name.is_empty());
    while let Some(current) = next {
        if visited.iter().any(|seen| seen == current) {
            visited.push(current.to_string());
            return Err(Error::AssemblyCycle {
                assembly: assembly.to_string(),
                repeated: current.to_string(),
                chain: visited,
            });
        }
        visited.push(current.to_string());
        next = releases
            .assembly(current)
            .and_then(|definition| definition.basis_assembly());
    }

    tracing::trace!(assembly, chain = ?visited, "Walked assembly basis chain");
    Ok(visited)
}

/// Fail if the basis chain starting at `assembly` loops.
pub fn check_recursion(releases: &ReleasesDocument, assembly: &str) -> Result<()> {
    assembly_chain(releases, assembly).map(|_| ())
}

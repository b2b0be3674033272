//! # Catalog Subcommands
//!
//! `sxg types` lists every gateway type; `sxg describe` prints one type's
//! shape and, optionally, the definitions it depends on.

use anyhow::{Context, Result};
use clap::Args;

use sxg_schema::{gateway, SchemaCatalog};

/// Arguments for the `sxg describe` subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Gateway type name.
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Also print every type the definition depends on.
    #[arg(long)]
    pub deps: bool,
}

/// Execute `sxg types`.
pub fn run_types() -> Result<u8> {
    let catalog = gateway::catalog().context("gateway catalog is inconsistent")?;
    for name in catalog.names() {
        println!("{name}");
    }
    Ok(0)
}

/// Execute `sxg describe`.
pub fn run_describe(args: &DescribeArgs) -> Result<u8> {
    let catalog = gateway::catalog().context("gateway catalog is inconsistent")?;
    for line in describe(&catalog, &args.type_name, args.deps)? {
        println!("{line}");
    }
    Ok(0)
}

/// Render `name = <shape>` lines for a type and, if requested, its dependencies.
pub fn describe(catalog: &SchemaCatalog, name: &str, with_deps: bool) -> Result<Vec<String>> {
    let node = catalog.resolve(name)?;
    let mut lines = vec![format!("{name} = {node}")];
    if with_deps {
        for dep in catalog.dependencies(name)? {
            if dep != name {
                lines.push(format!("{dep} = {}", catalog.resolve(dep)?));
            }
        }
    }
    Ok(lines)
}

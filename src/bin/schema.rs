use std::env::current_dir;
use std::fs::create_dir_all;
use std::io;

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

use metanode_stake_client::msg::{ClientConfigMsg, ExecuteMsg, QueryMsg, Receipt};
use metanode_stake_client::state::ClientConfig;

fn main() -> io::Result<()> {
    let mut out_dir = current_dir()?;
    out_dir.push("schema");
    create_dir_all(&out_dir)?;
    remove_schemas(&out_dir)?;

    export_schema(&schema_for!(ClientConfigMsg), &out_dir);
    export_schema(&schema_for!(ClientConfig), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(Receipt), &out_dir);
    Ok(())
}

use clap::Args;
use serde_json::json;

use crate::cli::utils::output_result;
use crate::cli::OutputFormat;
use crate::namespace::{normalize_franchise_name, resolve};
use crate::session::Tier;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[arg(long, help = "Tier (1-4)")]
    pub tier: Option<Tier>,

    #[arg(long, default_value = "", help = "Current role")]
    pub role: String,

    #[arg(long, default_value = "", help = "Franchise name")]
    pub franchise: String,

    #[arg(long, help = "Normalize the franchise display name first")]
    pub normalize: bool,
}

pub fn handle(args: ResolveArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let franchise = if args.normalize {
        normalize_franchise_name(&args.franchise)
    } else {
        args.franchise
    };

    let namespace = resolve(args.tier, &args.role, &franchise);

    output_result(
        &output_format,
        namespace.as_str(),
        json!({
            "tier": args.tier,
            "role": args.role,
            "franchise": franchise,
            "namespace": namespace,
        }),
    )
}

pub fn normalize(name: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let normalized = normalize_franchise_name(name);
    output_result(
        &output_format,
        &normalized,
        json!({ "name": name, "normalized": normalized }),
    )
}

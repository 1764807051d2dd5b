use clap::Args;
use serde_json::json;

use crate::cli::utils::output_result;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::middleware::guard::{classify, evaluate, Decision};
use crate::session::{SessionIdentity, Tier};

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(help = "Requested path, e.g. /a/broker/dashboard")]
    pub path: String,

    #[arg(long, help = "Auth token (presence is all that matters)")]
    pub token: Option<String>,

    #[arg(long, help = "Current role")]
    pub role: Option<String>,

    #[arg(long, help = "Tier (1-4)")]
    pub tier: Option<Tier>,

    #[arg(long, help = "Franchise name as stored in the session")]
    pub franchise: Option<String>,

    #[arg(long, help = "Raw Cookie header; overrides the individual flags")]
    pub cookie: Option<String>,
}

pub fn handle(args: CheckArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = match args.cookie {
        Some(raw) => SessionIdentity::from_cookie_header(&raw),
        None => SessionIdentity {
            auth_token: args.token,
            current_role: args.role,
            franchise_name: args.franchise,
            tier: args.tier,
            roles: Vec::new(),
        },
    };

    // Guard paths come from the same env-driven config the server uses
    let config = AppConfig::from_env();
    let class = classify(&args.path, &config.guard);
    let decision = evaluate(&args.path, &session, &config.guard);

    let text = match &decision {
        Decision::Allow => format!("allow {}", args.path),
        Decision::Redirect { location, reason } => {
            format!("redirect {} -> {} ({:?})", args.path, location, reason)
        }
    };

    output_result(
        &output_format,
        &text,
        json!({
            "path": args.path,
            "class": class,
            "decision": decision,
        }),
    )
}

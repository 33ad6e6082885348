//! CLI doctor command: environment and rendering-tool probe.

use anyhow::Result;
use std::env;

use umlforge_render::PlantUmlRenderer;

use crate::config::Config;

/// Executes the full doctor diagnosis.
pub async fn run(config: &Config) -> Result<()> {
    println!("\n🔍 Running umlforge doctor...\n");

    let env_ok = check_env_vars();
    let tool_ok = check_tool(config).await;

    println!();
    if env_ok && tool_ok {
        println!("✅ All checks passed! umlforge is ready.");
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
    }

    Ok(())
}

fn check_env_vars() -> bool {
    println!("Checking Environment Variables:");

    let checks = [
        ("GEMINI_API_KEY", false), // false = required
        ("UMLFORGE_MODEL", true),  // true = optional
        ("UMLFORGE_API_URL", true),
        ("UMLFORGE_TOOL", true),
        ("UMLFORGE_OUT_DIR", true),
    ];

    let mut all_good = true;

    for (var, optional) in checks {
        match env::var(var) {
            Ok(val) if !val.is_empty() => {
                println!("  🟢 {} is set", var);
            }
            _ => {
                if optional {
                    println!("  🟡 {} is missing (optional)", var);
                } else {
                    println!("  🔴 {} is missing (REQUIRED)", var);
                    all_good = false;
                }
            }
        }
    }

    all_good
}

async fn check_tool(config: &Config) -> bool {
    println!("Checking Rendering Tool:");

    let renderer = PlantUmlRenderer::new(config.renderer_config(false));
    match renderer.probe_tool().await {
        Ok(()) => {
            println!("  🟢 '{}' is invocable", config.tool);
            true
        }
        Err(e) => {
            println!("  🔴 {}", e);
            false
        }
    }
}

//! MCP server exposing the plugin rankings as tools.
//!
//! Every tool call is one request: it opens a fresh [`RankingRequest`], so
//! `plugin_rankings` computes both lists from a single catalog fetch.

use crate::ranking::ScoredPlugin;
use crate::service::{RankingRequest, RankingService};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;
use std::fmt::Write as _;

/// Parameters shared by the ranking tools
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct RankingToolRequest {
    /// Maximum number of plugins to return (default: 8)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// MCP server for plugin rankings
#[derive(Clone)]
pub struct RankingServer {
    service: RankingService,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for RankingServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingServer")
            .field("service", &self.service)
            .finish()
    }
}

#[tool_router]
impl RankingServer {
    pub fn new(service: RankingService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    fn open_request(&self) -> RankingRequest {
        let request = self.service.request();
        tracing::debug!(now = %request.now(), "Opened ranking request");
        request
    }

    #[tool(
        description = "List the most popular published plugins. Popularity favours upvotes, GitHub stars and forks, with a small bonus for maturity and maintenance."
    )]
    async fn popular_plugins(
        &self,
        Parameters(request): Parameters<RankingToolRequest>,
    ) -> String {
        let ranking = self.open_request();
        format_ranking("Popular plugins", &ranking.popular_scored(request.limit).await)
    }

    #[tool(
        description = "List the currently trending published plugins. Trending favours recent repository updates, recent comments and new plugins with fast-growing views."
    )]
    async fn trending_plugins(
        &self,
        Parameters(request): Parameters<RankingToolRequest>,
    ) -> String {
        let ranking = self.open_request();
        format_ranking("Trending plugins", &ranking.trending_scored(request.limit).await)
    }

    #[tool(
        description = "List both the popular and the trending plugins, ranked from the same catalog snapshot."
    )]
    async fn plugin_rankings(
        &self,
        Parameters(request): Parameters<RankingToolRequest>,
    ) -> String {
        let ranking = self.open_request();
        let popular = ranking.popular_scored(request.limit).await;
        let trending = ranking.trending_scored(request.limit).await;

        let mut output = format_ranking("Popular plugins", &popular);
        output.push('\n');
        output.push_str(&format_ranking("Trending plugins", &trending));
        output
    }
}

#[tool_handler]
impl ServerHandler for RankingServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "plugin-rank: popular and trending rankings for the plugin directory. \
                 Use popular_plugins or trending_plugins for one list, plugin_rankings for both.",
            )
    }
}

/// Render a ranking as a numbered Markdown list.
pub fn format_ranking(title: &str, ranking: &[ScoredPlugin]) -> String {
    let mut output = format!("## {}\n\n", title);

    if ranking.is_empty() {
        output.push_str("No plugins to rank.\n");
        return output;
    }

    for (position, scored) in ranking.iter().enumerate() {
        let plugin = &scored.plugin;
        let _ = write!(output, "{}. **{}**", position + 1, plugin.display_name());
        if let Some(slug) = &plugin.slug {
            let _ = write!(output, " (`{}`)", slug);
        }
        let _ = writeln!(output, " score {:.2}", scored.score);
    }

    output
}

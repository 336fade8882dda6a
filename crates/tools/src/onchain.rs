//! Contract research tools.
//!
//! The fetchers validate the address and then return illustrative market,
//! on-chain and social figures. `farcaster_fetch` switches to a live Neynar
//! search when a client is configured. The analysis tools return canned
//! assessments; the model does the actual reasoning over them.

use crate::{is_valid_address, report::Report, with_args};
use chrono::Local;
use llm::{LLM, Tool};
use runtime::Runtime;
use schemars::JsonSchema;
use search::{Farcaster, render_casts};
use serde::Deserialize;
use std::{fmt, path::PathBuf, sync::Arc};

pub const INVALID_ADDRESS: &str = "Error: Invalid Ethereum contract address format";

/// Tool names exposed by [`register`].
pub const FETCH_TOOLS: [&str; 3] = ["farcaster_fetch", "coingecko_fetch", "etherscan_fetch"];

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ContractArgs {
    /// The Ethereum contract address to search for
    contract_address: String,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct SocialArgs {
    /// Raw social data from Farcaster
    social_data: String,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct MarketArgs {
    /// Raw market data from Coingecko
    market_data: String,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct OnChainArgs {
    /// Raw on-chain data from Etherscan
    on_chain_data: String,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct EvaluationArgs {
    /// Analysis of social sentiment
    social_analysis: String,
    /// Analysis of market data
    market_analysis: String,
    /// Analysis of on-chain data
    on_chain_analysis: String,
}

/// Stages of a contract analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    DataCollection,
    DataAnalysis,
    Evaluation,
    ReportGeneration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DataCollection => "data_collection",
            Self::DataAnalysis => "data_analysis",
            Self::Evaluation => "evaluation",
            Self::ReportGeneration => "report_generation",
        })
    }
}

#[derive(Deserialize, JsonSchema)]
struct ProgressArgs {
    /// Current stage of analysis
    stage: Stage,
    /// Status message for this stage
    status: String,
}

/// Kinds of data an agent may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Social,
    Market,
    Onchain,
    Other,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Social => "social",
            Self::Market => "market",
            Self::Onchain => "onchain",
            Self::Other => "other",
        })
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct AdditionalDataArgs {
    /// Type of additional data needed
    data_type: DataType,
    /// Why this additional data is needed
    reason: String,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ReportArgs {
    /// The Ethereum contract address that was analyzed
    contract_address: String,
    /// Analysis of social sentiment
    social_analysis: String,
    /// Analysis of market data
    market_analysis: String,
    /// Analysis of on-chain data
    on_chain_analysis: String,
    /// The final opportunity evaluation
    evaluation: String,
}

#[derive(Deserialize, JsonSchema)]
struct QueryArgs {
    /// The contract address or search terms
    query: String,
}

pub fn coingecko(address: &str) -> String {
    if !is_valid_address(address) {
        return INVALID_ADDRESS.to_owned();
    }
    format!(
        "Coingecko data for contract {address}:\n\
         - Current price: $0.0458\n\
         - 24h change: +12.3%\n\
         - 7d change: +45.7%\n\
         - Market cap: $4,580,000\n\
         - 24h volume: $1,250,000\n\
         - Liquidity: $850,000\n\
         - Launched: 14 days ago\n\
         - Initial price: $0.0210"
    )
}

pub fn etherscan(address: &str) -> String {
    if !is_valid_address(address) {
        return INVALID_ADDRESS.to_owned();
    }
    format!(
        "Etherscan data for contract {address}:\n\
         - Contract verified: Yes\n\
         - Created: 2024-05-01\n\
         - Creator address: 0x7a2309a8f1E037ae65C295b4f7dBD24C496ab8B3\n\
         - Total transactions: 5,827\n\
         - Unique holders: 1,459\n\
         - Top 10 holders concentration: 45.3%\n\
         - Recent transaction volume: 325 ETH (24h)\n\
         - Token standard: ERC-20"
    )
}

/// Social data for a contract, live when `client` is set.
pub async fn farcaster(client: Option<&Farcaster>, address: &str) -> String {
    if !is_valid_address(address) {
        return INVALID_ADDRESS.to_owned();
    }

    let Some(client) = client else {
        return format!(
            "Farcaster data for contract {address}:\n\
             - 127 mentions in the last 24 hours\n\
             - Sentiment: 78% positive, 15% neutral, 7% negative\n\
             - Key influencers discussing: @crypto_wizard, @defi_analyst, @nft_hunter\n\
             - Common topics: \"promising project\", \"innovative tokenomics\", \"strong community\"\n\
             - Recent activity spike: 3.2x increase in mentions since yesterday"
        );
    };

    match client.contract(address).await {
        Ok(casts) => format!(
            "Farcaster data for contract {address}:\n{}",
            render_casts(&casts)
        ),
        Err(e) => {
            tracing::warn!("farcaster fetch failed: {e}");
            format!("Error fetching Farcaster data: {e}")
        }
    }
}

const SOCIAL_ANALYSIS: &str = "Social Sentiment Analysis:\n\
- Overall sentiment is strongly positive with 78% positive mentions\n\
- Notable increase in discussion volume (3.2x) indicates growing interest\n\
- Engagement from established influencers suggests credibility\n\
- Key positive themes: innovative tokenomics, strong community\n\
- No significant red flags in community discussions\n\
- Recommendation: Social signals are POSITIVE";

const MARKET_ANALYSIS: &str = "Market Analysis:\n\
- Price performance is strong (+45.7% in 7 days)\n\
- Market cap of $4.58M indicates early-stage but established project\n\
- Healthy trading volume relative to market cap (27% ratio)\n\
- Liquidity is adequate for current market size\n\
- Price appreciation pattern appears sustainable rather than parabolic\n\
- ROI since launch is 118% in just 14 days\n\
- Recommendation: Market signals are POSITIVE";

const ON_CHAIN_ANALYSIS: &str = "On-Chain Analysis:\n\
- Contract is verified, increasing transparency and trustworthiness\n\
- Distribution of holders (1,459) is healthy for a 2-week old project\n\
- Top 10 wallet concentration (45.3%) is moderate but not concerning\n\
- Transaction activity indicates actual use rather than speculation only\n\
- Creator address has good reputation based on previous projects\n\
- No suspicious token movements detected\n\
- Recommendation: On-chain signals are POSITIVE";

const EVALUATION: &str = "Opportunity Evaluation:\n\
\n\
After reviewing all available data and analysis:\n\
\n\
- Social sentiment is positive with strong community engagement\n\
- Market performance shows healthy growth without excessive volatility\n\
- On-chain metrics indicate legitimate activity and reasonable distribution\n\
\n\
OVERALL ASSESSMENT: This appears to be a GOOD opportunity with a favorable risk/reward ratio.\n\
\n\
Key strengths:\n\
- Verified contract with transparent operations\n\
- Growing community with positive sentiment\n\
- Sustainable price growth rather than pump-and-dump pattern\n\
\n\
Potential risks:\n\
- Still an early-stage project with inherent volatility risk\n\
- Monitor top wallet concentration for potential large sell-offs\n\
\n\
Recommendation: Consider allocating a moderate position with defined stop-loss.";

/// Canned sentiment assessment of `social_data`.
pub fn analyze_social(social_data: &str) -> String {
    tracing::debug!("social analysis over {} bytes", social_data.len());
    SOCIAL_ANALYSIS.to_owned()
}

pub fn analyze_market(market_data: &str) -> String {
    tracing::debug!("market analysis over {} bytes", market_data.len());
    MARKET_ANALYSIS.to_owned()
}

pub fn analyze_on_chain(on_chain_data: &str) -> String {
    tracing::debug!("on-chain analysis over {} bytes", on_chain_data.len());
    ON_CHAIN_ANALYSIS.to_owned()
}

/// Canned verdict over the three analyses.
pub fn evaluate(social: &str, market: &str, on_chain: &str) -> String {
    tracing::debug!(
        "evaluating {} bytes of analysis",
        social.len() + market.len() + on_chain.len()
    );
    EVALUATION.to_owned()
}

pub fn update_progress(stage: Stage, status: &str) -> String {
    tracing::info!("[PROGRESS] {stage}: {status}");
    format!("Analysis progress updated: {stage} - {status}")
}

pub fn request_additional_data(data_type: DataType, reason: &str) -> String {
    format!(
        "Request for additional {data_type} data noted: {reason}. \
         Please provide this information to continue the analysis."
    )
}

/// Register the fetch, analysis, progress and data-request tools.
pub fn register<P: LLM>(runtime: &mut Runtime<P>, farcaster_client: Option<Farcaster>) {
    let client = farcaster_client.map(Arc::new);
    runtime.register(
        Tool::new::<ContractArgs>(
            "farcaster_fetch",
            "Fetch social data about a contract from Farcaster.",
        ),
        move |args| {
            let client = client.clone();
            async move {
                match crate::parse::<ContractArgs>(&args) {
                    Ok(a) => farcaster(client.as_deref(), &a.contract_address).await,
                    Err(e) => e,
                }
            }
        },
    );
    runtime.register(
        Tool::new::<ContractArgs>(
            "coingecko_fetch",
            "Fetch market data about a token from Coingecko.",
        ),
        |args| async move { with_args(&args, |a: ContractArgs| coingecko(&a.contract_address)) },
    );
    runtime.register(
        Tool::new::<ContractArgs>(
            "etherscan_fetch",
            "Fetch on-chain data about a contract from Etherscan.",
        ),
        |args| async move { with_args(&args, |a: ContractArgs| etherscan(&a.contract_address)) },
    );

    runtime.register(
        Tool::new::<SocialArgs>(
            "analyze_social_sentiment",
            "Analyze social data to determine sentiment and community interest.",
        ),
        |args| async move { with_args(&args, |a: SocialArgs| analyze_social(&a.social_data)) },
    );
    runtime.register(
        Tool::new::<MarketArgs>(
            "analyze_market_data",
            "Analyze market data to evaluate price performance and metrics.",
        ),
        |args| async move { with_args(&args, |a: MarketArgs| analyze_market(&a.market_data)) },
    );
    runtime.register(
        Tool::new::<OnChainArgs>(
            "analyze_on_chain_data",
            "Analyze on-chain data to evaluate contract health and activity.",
        ),
        |args| async move {
            with_args(&args, |a: OnChainArgs| analyze_on_chain(&a.on_chain_data))
        },
    );
    runtime.register(
        Tool::new::<EvaluationArgs>(
            "evaluate_opportunity",
            "Evaluate all analysis to determine if this is a good opportunity.",
        ),
        |args| async move {
            with_args(&args, |a: EvaluationArgs| {
                evaluate(&a.social_analysis, &a.market_analysis, &a.on_chain_analysis)
            })
        },
    );

    runtime.register(
        Tool::new::<ProgressArgs>(
            "update_progress",
            "Update the progress of the analysis workflow.",
        ),
        |args| async move {
            with_args(&args, |a: ProgressArgs| update_progress(a.stage, &a.status))
        },
    );
    runtime.register(
        Tool::new::<AdditionalDataArgs>(
            "request_additional_data",
            "Request additional data when current information is insufficient.",
        ),
        |args| async move {
            with_args(&args, |a: AdditionalDataArgs| {
                request_additional_data(a.data_type, &a.reason)
            })
        },
    );
}

/// Register `farcaster_search`, a raw cast search over Neynar.
pub fn register_search<P: LLM>(runtime: &mut Runtime<P>, client: Farcaster) {
    let client = Arc::new(client);
    runtime.register(
        Tool::new::<QueryArgs>(
            "farcaster_search",
            "Search for Farcaster casts related to a specific Ethereum contract address. \
             Use this to find conversations about specific blockchain tokens or contracts.",
        ),
        move |args| {
            let client = client.clone();
            async move {
                let query = match crate::parse::<QueryArgs>(&args) {
                    Ok(a) => a.query,
                    Err(e) => return e,
                };
                match client.contract(&query).await {
                    Ok(casts) => render_casts(&casts),
                    Err(e) => format!("Error searching Farcaster: {e}"),
                }
            }
        },
    );
}

/// The report compiled from a finished contract analysis.
pub fn contract_report(
    address: &str,
    social: &str,
    market: &str,
    on_chain: &str,
    evaluation: &str,
) -> Report {
    Report::new("Contract Analysis Report")
        .subject(address)
        .section("Social Sentiment", social)
        .section("Market Data", market)
        .section("On-Chain Activity", on_chain)
        .section("Opportunity Evaluation", evaluation)
}

/// Register `generate_report`, writing markdown reports into `dir`.
pub fn register_report<P: LLM>(runtime: &mut Runtime<P>, dir: PathBuf) {
    let dir = Arc::new(dir);
    runtime.register(
        Tool::new::<ReportArgs>(
            "generate_report",
            "Generate the final markdown report from all collected data and analysis.",
        ),
        move |args| {
            let dir = dir.clone();
            async move {
                with_args(&args, |a: ReportArgs| {
                    let report = contract_report(
                        &a.contract_address,
                        &a.social_analysis,
                        &a.market_analysis,
                        &a.on_chain_analysis,
                        &a.evaluation,
                    );
                    match report.write(&dir, "contract_report", &Local::now()) {
                        Ok(path) => {
                            tracing::info!("report written to {}", path.display());
                            format!("Report written to {}", path.display())
                        }
                        Err(e) => format!("Error writing report: {e}"),
                    }
                })
            }
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::{General, Scripted, ToolCall};

    const ADDRESS: &str = "0x1234567890123456789012345678901234567890";

    #[test]
    fn fetchers_reject_bad_addresses() {
        assert_eq!(coingecko("0x123"), INVALID_ADDRESS);
        assert_eq!(etherscan("not an address"), INVALID_ADDRESS);
        assert!(coingecko(ADDRESS).starts_with(&format!("Coingecko data for contract {ADDRESS}:")));
        assert!(etherscan(ADDRESS).contains("Token standard: ERC-20"));
    }

    #[tokio::test]
    async fn farcaster_falls_back_to_mock() {
        let text = farcaster(None, ADDRESS).await;
        assert!(text.starts_with(&format!("Farcaster data for contract {ADDRESS}:")));
        assert!(text.contains("127 mentions"));
        assert_eq!(farcaster(None, "0x123").await, INVALID_ADDRESS);
    }

    #[test]
    fn progress_and_requests() {
        assert_eq!(
            update_progress(Stage::DataCollection, "fetching"),
            "Analysis progress updated: data_collection - fetching"
        );
        assert_eq!(
            request_additional_data(DataType::Onchain, "holders missing"),
            "Request for additional onchain data noted: holders missing. \
             Please provide this information to continue the analysis."
        );
    }

    #[tokio::test]
    async fn registered_tools_decode_arguments() {
        let mut rt = Runtime::new(General::default(), Scripted::new());
        register(&mut rt, None);

        let results = rt
            .dispatch(&[
                ToolCall::function(
                    "1",
                    "coingecko_fetch",
                    &format!(r#"{{"contractAddress":"{ADDRESS}"}}"#),
                ),
                ToolCall::function(
                    "2",
                    "update_progress",
                    r#"{"stage":"report_generation","status":"done"}"#,
                ),
                ToolCall::function("3", "update_progress", r#"{"stage":"lunch","status":"x"}"#),
                ToolCall::function(
                    "4",
                    "analyze_market_data",
                    r#"{"marketData":"price up"}"#,
                ),
            ])
            .await;

        assert!(results[0].content.contains("Market cap: $4,580,000"));
        assert_eq!(
            results[1].content,
            "Analysis progress updated: report_generation - done"
        );
        assert!(results[2].content.starts_with("invalid arguments"));
        assert!(results[3].content.starts_with("Market Analysis:"));
    }

    #[tokio::test]
    async fn analysis_tools_require_their_inputs() {
        let mut rt = Runtime::new(General::default(), Scripted::new());
        register(&mut rt, None);

        let results = rt
            .dispatch(&[
                ToolCall::function("1", "analyze_social_sentiment", "{}"),
                ToolCall::function(
                    "2",
                    "evaluate_opportunity",
                    r#"{"socialAnalysis":"s","marketAnalysis":"m","onChainAnalysis":"o"}"#,
                ),
                ToolCall::function("3", "analyze_on_chain_data", r#"{"onChainData":"x"}"#),
            ])
            .await;
        assert!(results[0].content.starts_with("invalid arguments"));
        assert!(results[0].content.contains("socialData"));
        assert!(results[1].content.starts_with("Opportunity Evaluation:"));
        assert!(results[2].content.starts_with("On-Chain Analysis:"));
    }

    #[test]
    fn contract_report_orders_sections() {
        let text = contract_report(ADDRESS, "s", "m", "o", "e").render();
        let social = text.find("## Social Sentiment").unwrap();
        let market = text.find("## Market Data").unwrap();
        let chain = text.find("## On-Chain Activity").unwrap();
        let eval = text.find("## Opportunity Evaluation").unwrap();
        assert!(social < market && market < chain && chain < eval);
        assert!(text.contains(&format!("## Token: {ADDRESS}")));
    }

    #[tokio::test]
    async fn generate_report_writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut rt = Runtime::new(General::default(), Scripted::new());
        register_report(&mut rt, dir.path().to_path_buf());

        let args = serde_json::json!({
            "contractAddress": ADDRESS,
            "socialAnalysis": "positive",
            "marketAnalysis": "growing",
            "onChainAnalysis": "healthy",
            "evaluation": "good",
        })
        .to_string();
        let result = rt
            .dispatch(&[ToolCall::function("1", "generate_report", &args)])
            .await;
        assert!(result[0].content.starts_with("Report written to "));

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let path = entries[0].as_ref().unwrap().path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("contract_report_") && name.ends_with(".md"));
        let body = std::fs::read_to_string(path).unwrap();
        assert!(body.starts_with("# Contract Analysis Report\n\n"));
        assert!(body.ends_with("## Opportunity Evaluation\n\ngood"));
    }
}

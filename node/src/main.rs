#[macro_use]
extern crate tracing;

mod cli;
mod log;

use analysis::{AnalysisService, RandomAnalysis};
use anyhow::{anyhow, Context, Result};
use chain::{AnchorClient, ChainConfig, MarketplaceClient, PassportClient};
use clap::ArgMatches;
use ethereum_types::Address;
use shared_types::passport_metadata;

fn parse_address(value: &str) -> Result<Address> {
    value
        .trim_start_matches("0x")
        .parse::<Address>()
        .map_err(|_| anyhow!("invalid address: {}", value))
}

fn read_file(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path))
}

fn commit(matches: &ArgMatches) -> Result<()> {
    let path = matches.get_one::<String>("file").expect("required");
    let data = read_file(path)?;
    let result = storage::commit_content(&data);
    println!("cid:       {}", result.cid);
    println!("data root: {:?}", result.data_root);
    println!("size:      {} bytes", result.size);
    println!("chunks:    {}", chunked_merkle::num_chunks(result.size));
    Ok(())
}

fn prove(matches: &ArgMatches) -> Result<()> {
    let path = matches.get_one::<String>("file").expect("required");
    let index: usize = matches
        .get_one::<String>("index")
        .expect("required")
        .parse()
        .context("chunk index must be a non-negative integer")?;

    let data = read_file(path)?;
    let chunks = chunked_merkle::num_chunks(data.len());
    if index >= chunks {
        return Err(anyhow!("chunk index {} out of range ({} chunks)", index, chunks));
    }

    let root = chunked_merkle::compute_root(&data);
    let proof = chunked_merkle::compute_proof(&data, index);
    let leaf = chunked_merkle::leaf_hashes(&data)[index];
    proof.validate(&leaf, &root)?;

    println!("data root: {:?}", root);
    println!("leaf:      {:?}", leaf);
    for (level, sibling) in proof.lemma().iter().enumerate() {
        println!("lemma[{}]:  {:?}", level, sibling);
    }
    println!("proof verifies locally");
    Ok(())
}

async fn register(matches: &ArgMatches) -> Result<()> {
    let path = matches.get_one::<String>("file").expect("required");
    let researcher = parse_address(matches.get_one::<String>("researcher").expect("required"))?;

    let config = ChainConfig::from_env()?;
    let anchor = AnchorClient::new(&config).await?;

    let data = read_file(path)?;
    let upload = storage::commit_content(&data);
    info!(cid = %upload.cid, size = upload.size, "Committed upload");

    let (research_id, confirmation) = anchor
        .register_research(upload.data_root, &upload.cid, researcher)
        .await?;
    println!(
        "registered research {} in block {} (tx {:?})",
        research_id, confirmation.block_number, confirmation.tx_hash
    );

    let report = RandomAnalysis
        .analyze(research_id, &upload.cid, upload.data_root)
        .await?;
    anchor
        .attach_analysis(research_id, report.attestation_hash, report.quality_score)
        .await?;
    println!("{}", report.summary);

    let metadata = passport_metadata(research_id, &upload.cid, &report, researcher);
    println!("passport metadata:\n{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

async fn mint(matches: &ArgMatches) -> Result<()> {
    let research_id: u64 = matches
        .get_one::<String>("research-id")
        .expect("required")
        .parse()
        .context("research id must be an integer")?;
    let to = parse_address(matches.get_one::<String>("to").expect("required"))?;
    let uri = matches.get_one::<String>("uri").expect("required");

    let config = ChainConfig::from_env()?;
    let passport = PassportClient::new(&config).await?;
    let (token_id, confirmation) = passport.mint_passport(to, research_id, uri).await?;
    println!(
        "minted passport token {} in block {} (tx {:?})",
        token_id, confirmation.block_number, confirmation.tx_hash
    );
    Ok(())
}

async fn listings() -> Result<()> {
    let config = ChainConfig::from_env()?;
    let marketplace = MarketplaceClient::new(&config).await?;
    let listings = marketplace.active_listings().await?;
    if listings.is_empty() {
        println!("no active listings");
        return Ok(());
    }
    for listing in listings {
        println!(
            "#{} token {} seller {:?} price {} wei{}",
            listing.listing_id,
            listing.token_id,
            listing.seller,
            listing.price,
            if listing.active { "" } else { " (inactive)" }
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    log::configure();

    let matches = cli::app().get_matches();
    match matches.subcommand() {
        Some(("commit", sub)) => commit(sub),
        Some(("prove", sub)) => prove(sub),
        Some(("register", sub)) => register(sub).await,
        Some(("mint", sub)) => mint(sub).await,
        Some(("listings", _)) => listings().await,
        _ => unreachable!("subcommand required"),
    }
}

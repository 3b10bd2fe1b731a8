use clap::{arg, Command};

pub fn app() -> Command {
    Command::new("mintora_node")
        .about("Mintora research anchoring node")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("commit")
                .about("Compute the CID and Merkle data root of a file")
                .arg(arg!(<file> "Path of the file to commit")),
        )
        .subcommand(
            Command::new("prove")
                .about("Compute and locally verify the inclusion proof for one chunk")
                .arg(arg!(<file> "Path of the committed file"))
                .arg(arg!(<index> "Zero-based chunk index")),
        )
        .subcommand(
            Command::new("register")
                .about("Anchor a file on chain, run analysis and attach the attestation")
                .arg(arg!(<file> "Path of the file to register"))
                .arg(arg!(--researcher <ADDRESS> "Address credited as the researcher")),
        )
        .subcommand(
            Command::new("mint")
                .about("Mint a research passport for a registered entry")
                .arg(arg!(--"research-id" <ID> "Registered research id"))
                .arg(arg!(--to <ADDRESS> "Recipient of the passport token"))
                .arg(arg!(--uri <URI> "Token metadata URI")),
        )
        .subcommand(Command::new("listings").about("Show active marketplace listings"))
}

use cidr_subnet_tools::{
    detailed_report, merge_cidr_strings, parse_address, CidrBlock, DEFAULT_ENUMERATION_LIMIT,
};
use colored::Colorize;
use itertools::Itertools;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    log::info!("#Start main()");

    println!("{}", "=== Address to integer ===".bold());
    for ip in ["0.0.0.0", "192.168.1.1", "192.168.1.100", "255.255.255.255"] {
        let addr = parse_address(ip)?;
        println!("{ip} -> {}", u32::from(addr));
    }

    println!("\n{}", "=== CIDR normalization ===".bold());
    let block = CidrBlock::parse("192.168.1.100/24")?;
    println!("original:   {block}");
    println!("normalized: {}", block.normalize());
    println!(
        "bitwise:    {addr} & {mask} = {network}",
        addr = u32::from(block.addr),
        mask = block.mask(),
        network = u32::from(block.network()),
    );

    println!("\n{}", "=== Block report ===".bold());
    print!("{}", detailed_report(&block));

    println!("\n{}", "=== Usable hosts of 192.168.1.0/30 ===".bold());
    let small = CidrBlock::parse("192.168.1.0/30")?;
    println!(
        "{}",
        small
            .usable_addresses(DEFAULT_ENUMERATION_LIMIT)?
            .iter()
            .join(", ")
    );

    println!("\n{}", "=== Merge ===".bold());
    let input = [
        "192.168.1.0/26",
        "192.168.1.64/26",
        "192.168.1.128/26",
        "192.168.1.192/26",
    ];
    let merged = merge_cidr_strings(&input)?;
    println!("input:  {}", input.iter().join(", "));
    println!("merged: {}", merged.iter().join(", "));
    println!("json:   {}", serde_json::to_string(&merged)?);

    Ok(())
}

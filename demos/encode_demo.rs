//! Query name encoding walkthrough
//! Packages a message under a carrier domain and shows the length arithmetic
//! behind each emitted query name.

use naqb::{alphabet, Domain, PackagedMessage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== DNS Query Name Encoding Demo ===\n");

    let carrier = Domain::parse("tunnel.example.com")?;
    println!(
        "Carrier: {} ({} bytes, room for {} more)",
        carrier,
        carrier.textual_length(),
        carrier.max_next_label_length()
    );

    let message = b"The quick brown fox jumps over the lazy dog, twice: \
the quick brown fox jumps over the lazy dog.";
    let payload = alphabet::encode_payload(message);
    println!(
        "\nMessage: {} bytes -> {} domain-safe bytes after base64\n",
        message.len(),
        payload.len()
    );

    let base = carrier.clone();
    let packager = PackagedMessage::new(payload, move |seq| {
        base.prepended(format!("q{seq}"))
            .unwrap_or_else(|_| base.clone())
    })?;

    for (index, domain) in packager.enumerate() {
        println!(
            "query {}: {} bytes, {} labels",
            index,
            domain.textual_length(),
            domain.level()
        );
        println!("  {domain}\n");
    }

    println!("Each name above is a legal RFC 1035 query name; a tunnel");
    println!("client would now send one DNS query per name.");

    Ok(())
}

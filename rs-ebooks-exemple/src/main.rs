use rs_ebooks_core::CorpusModel;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Consume the corpus ("statuses" and/or "mentions" lists)
    // The model is cached to ./data/corpus.bin and reloaded from it next time
    let model = CorpusModel::open("./data/corpus.json")?;

    println!(
        "{} tokens, {} sentences, {} mentions",
        model.tokens().len(),
        model.sentences().len(),
        model.mentions().len()
    );

    // Generate 10 statuses of at most 140 characters
    for i in 0..10 {
        println!("Generated status {}: {}", i + 1, model.generate_status(140));
    }

    // Replies are built from the mentions sharing words with the input,
    // or from all statuses if too few of them match
    println!("Reply to 'hi': {}", model.generate_reply("hi", 140, None));

    // Keywords are ranked from the statuses only
    println!("Top keywords: {}", model.keywords().iter().take(10).cloned().collect::<Vec<_>>().join(", "));

    // The JSON form has exactly four fields: tokens, sentences, mentions, keywords
    let json = model.serialize()?;
    let reloaded = CorpusModel::deserialize(&json)?;
    println!("JSON model: {} bytes, identical after reload: {}", json.len(), reloaded == model);

    Ok(())
}

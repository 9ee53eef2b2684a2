use keystream::{AlternatingStep, BitOrder, BitVector, CombinerConfig, KeystreamGenerator};

#[test]
fn captured_keystream_survives_bincode() {
    let mut asg = AlternatingStep::new(None).unwrap();
    let captured = asg.keystream(40).with_order(BitOrder::LsbFirst);

    let bytes = bincode::serialize(&captured).unwrap();
    let back: BitVector = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, captured);
    assert_eq!(back.order(), BitOrder::LsbFirst);
}

#[test]
fn experiment_config_from_json() {
    let json = r#"{
        "control": [2, 1, 0],
        "data_a": [3, 1, 0],
        "data_b": [5, 2, 0]
    }"#;
    let config: CombinerConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.seed_len().unwrap(), 10);

    let mut from_json = AlternatingStep::with_config(&config, None).unwrap();
    let mut built = AlternatingStep::with_config(
        &CombinerConfig::default()
            .with_control([2, 1, 0])
            .with_data_b([5, 2, 0]),
        None,
    )
    .unwrap();
    assert_eq!(from_json.keystream(32), built.keystream(32));
}

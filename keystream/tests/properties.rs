use keystream::{
    synthesize, synthesize_profile, AlternatingStep, BitOrder, BitVector, KeystreamError,
    KeystreamGenerator, Lfsr, TapSet,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_bits(rng: &mut StdRng, len: usize) -> BitVector {
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

fn random_nonzero_seed(rng: &mut StdRng, len: usize) -> BitVector {
    loop {
        let seed = random_bits(rng, len);
        if seed.count_ones() > 0 {
            return seed;
        }
    }
}

#[test]
fn integer_roundtrip_random() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let value: u64 = rng.gen();
        let width = 64 - value.leading_zeros() as usize;
        let length = width.max(1) + rng.gen_range(0..16);
        for order in [BitOrder::MsbFirst, BitOrder::LsbFirst] {
            let v = BitVector::from_integer(value, Some(length), order).unwrap();
            assert_eq!(v.len(), length);
            assert_eq!(v.to_integer(order).unwrap(), value as u128);
        }
    }
}

#[test]
fn byte_roundtrip_random() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let len = 8 * rng.gen_range(0..8);
        let v = random_bits(&mut rng, len);
        assert_eq!(BitVector::from_bytes(&v.to_bytes().unwrap(), BitOrder::MsbFirst), v);
        let lsb = v.to_bytes_with(BitOrder::LsbFirst).unwrap();
        assert_eq!(BitVector::from_bytes(&lsb, BitOrder::LsbFirst), v);
    }
}

#[test]
fn xor_self_inverse_and_mismatch() {
    let mut rng = StdRng::seed_from_u64(3);
    for len in 1..40 {
        let a = random_bits(&mut rng, len);
        let b = random_bits(&mut rng, len);
        assert_eq!(a.xor(&a).unwrap(), BitVector::zeros(len));
        assert_eq!(a.xor(&b).unwrap().xor(&b).unwrap(), a);

        let longer = random_bits(&mut rng, len + 1);
        assert!(matches!(a.xor(&longer), Err(KeystreamError::LengthMismatch { .. })));
        assert!(matches!(longer.and(&a), Err(KeystreamError::LengthMismatch { .. })));
    }
}

#[test]
fn register_determinism() {
    let mut rng = StdRng::seed_from_u64(5);
    for taps in [vec![5, 2, 0], vec![7, 6, 0], vec![8, 6, 5, 4, 0]] {
        let degree = taps[0];
        let seed = random_bits(&mut rng, degree);
        let mut a = Lfsr::new(taps.clone(), Some(seed.clone())).unwrap();
        let mut b = Lfsr::new(taps, Some(seed)).unwrap();
        assert_eq!(a.run(300, None).unwrap(), b.run(300, None).unwrap());
    }
}

#[test]
fn full_cycle_bounds() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(13);
    for taps in [vec![3, 1, 0], vec![4, 3, 0], vec![6, 1, 0], vec![6, 3, 0], vec![8, 4, 3, 2, 0]] {
        let degree = taps[0];
        let seed = random_nonzero_seed(&mut rng, degree);
        let mut lfsr = Lfsr::new(taps, Some(seed.clone())).unwrap();
        let cycle = lfsr.full_cycle(None).unwrap();
        assert!(!cycle.is_empty());
        assert!(cycle.len() <= (1 << degree) - 1);
        // every state lies on a cycle, so the walk returns to its start
        assert_eq!(lfsr.state(), &seed);
    }

    // primitive polynomial: maximal period
    let mut lfsr = Lfsr::new([8, 6, 5, 4, 0], None).unwrap();
    assert_eq!(lfsr.full_cycle(None).unwrap().len(), 255);
}

#[test]
fn synthesis_regenerates_continuation() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(17);
    for taps in [vec![3, 1, 0], vec![4, 1, 0], vec![5, 2, 0], vec![7, 1, 0], vec![8, 6, 5, 4, 0]] {
        let degree = taps[0];
        let expected: TapSet = taps.iter().copied().collect();
        for _ in 0..5 {
            let seed = random_nonzero_seed(&mut rng, degree);
            let mut lfsr = Lfsr::new(taps.clone(), Some(seed)).unwrap();
            let observed = lfsr.run(2 * degree, None).unwrap();

            let result = synthesize_profile(&observed);
            assert_eq!(result.taps, expected);
            assert_eq!(result.linear_complexity, degree);

            let mut replay = result.to_register(&observed).unwrap();
            assert_eq!(replay.run(2 * degree, None).unwrap(), observed);
            assert_eq!(replay.keystream(64), lfsr.keystream(64));
        }
    }
}

#[test]
fn synthesis_of_constant_ones() {
    let ones = BitVector::ones(4);
    let expected: TapSet = [0, 1].into_iter().collect();
    assert_eq!(synthesize(&ones), expected);
}

#[test]
fn combiner_irregular_clocking() {
    let mut rng = StdRng::seed_from_u64(19);
    let seed = random_nonzero_seed(&mut rng, 12);
    let mut a = AlternatingStep::new(Some(seed.clone())).unwrap();
    let mut b = AlternatingStep::new(Some(seed)).unwrap();

    let steps = 1000;
    assert_eq!(a.keystream(steps), b.keystream(steps));

    let clocked_a = a.data_a().clock_count();
    let clocked_b = a.data_b().clock_count();
    assert_eq!(a.control().clock_count(), steps as u64);
    assert_eq!(clocked_a + clocked_b, steps as u64);
    assert!(clocked_a > 0 && clocked_b > 0);
    assert_ne!(clocked_a, steps as u64);
    assert_ne!(clocked_b, steps as u64);
}

#[test]
fn combiner_keystream_is_not_linear_in_one_register() {
    let mut asg = AlternatingStep::new(None).unwrap();
    let observed = asg.keystream(64);
    let result = synthesize_profile(&observed);
    // far beyond any single component register
    assert!(result.linear_complexity > 5);
}

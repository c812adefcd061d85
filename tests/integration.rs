use rfc8017::{
    EncodingScheme, ExponentPolicy, HashAlg, KeyFactory, OaepParams, PrivateKey, PublicKey,
    SignatureParams,
};
use rand_chacha::rand_core::SeedableRng;


#[test]
fn test_expected_encrypt_flow_carmichael_2048() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);

    // Alice generates a keypair and publishes the public key as DER
    let (alice_pub, alice_priv) = KeyFactory::Carmichael
        .try_generate_with_rng(&mut rng, 2048, ExponentPolicy::Default)
        .unwrap();
    let alice_pub_bytes = alice_pub.try_to_der(EncodingScheme::Pkcs1).unwrap();

    // Bob decodes the public key and encrypts with SHA-256 OAEP
    let bob_pub = PublicKey::try_from_der(&alice_pub_bytes, EncodingScheme::Pkcs1).unwrap();
    let params = OaepParams::new(HashAlg::Sha256, HashAlg::Sha256);
    let ct = bob_pub.try_encrypt_with_rng(&mut rng, &params, b"hello world").unwrap();
    assert_eq!(ct.len(), 256);

    // Alice decrypts and recovers the message
    let pt = alice_priv.try_decrypt_with_rng(&mut rng, &params, &ct).unwrap();
    assert_eq!(pt, b"hello world");

    // Double check the internal consistency of the generated key
    assert!(alice_priv.validate_vartime());
}


#[test]
fn test_expected_encrypt_flow_euler_random_exponent() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(456);
    let (public, private) = KeyFactory::Euler
        .try_generate_with_rng(&mut rng, 2048, ExponentPolicy::Random)
        .unwrap();
    let params = OaepParams::new(HashAlg::Sha256, HashAlg::Sha256);
    let ct = public.try_encrypt_with_rng(&mut rng, &params, b"hello world").unwrap();
    let pt = private.try_decrypt_with_rng(&mut rng, &params, &ct).unwrap();
    assert_eq!(pt, b"hello world");
}


#[test]
fn test_round_trip_every_label_hash() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(789);
    let (public, private) = KeyFactory::Carmichael
        .try_generate_with_rng(&mut rng, 2048, ExponentPolicy::Default)
        .unwrap();
    for hash in [
        HashAlg::Sha1,
        HashAlg::Sha256,
        HashAlg::Sha384,
        HashAlg::Sha512,
        HashAlg::Sha512_224,
        HashAlg::Sha512_256,
    ] {
        let params = OaepParams::new(hash, HashAlg::Sha1);
        let ct = public.try_encrypt_with_rng(&mut rng, &params, b"hello world").unwrap();
        let pt = private.try_decrypt_with_rng(&mut rng, &params, &ct).unwrap();
        assert_eq!(pt, b"hello world", "{hash:?}");
    }
}


#[test]
fn test_expected_sign_flow_sha1_salt20() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(321);
    let (public, private) = KeyFactory::Carmichael
        .try_generate_with_rng(&mut rng, 2048, ExponentPolicy::Default)
        .unwrap();

    // PSS-SHA1 / MGF1-SHA1 / 20-octet salt over a 2048-bit modulus yields
    // a 256-octet signature.
    let params = SignatureParams::pss(HashAlg::Sha1, HashAlg::Sha1, 20);
    let sig = private.try_sign_with_rng(&mut rng, &params, b"hello world").unwrap();
    assert_eq!(sig.len(), 256);
    public.try_verify(&params, b"hello world", &sig).unwrap();
}


#[test]
fn test_sign_round_trip_parameter_matrix() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(654);
    let (public, private) = KeyFactory::Carmichael
        .try_generate_with_rng(&mut rng, 1024, ExponentPolicy::Default)
        .unwrap();
    for pss_hash in [HashAlg::Sha1, HashAlg::Sha256, HashAlg::Sha512_256] {
        for mgf_hash in [HashAlg::Sha1, HashAlg::Sha256] {
            for salt_len in [0, 20, pss_hash.output_len()] {
                let params = SignatureParams::pss(pss_hash, mgf_hash, salt_len);
                let sig = private.try_sign_with_rng(&mut rng, &params, b"msg").unwrap();
                public.try_verify(&params, b"msg", &sig).unwrap();
            }
        }
    }
}


#[test]
fn test_blinding_stability_across_repeated_decryptions() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(987);
    let (public, private) = KeyFactory::Carmichael
        .try_generate_with_rng(&mut rng, 1024, ExponentPolicy::Default)
        .unwrap();
    let params = OaepParams::default();
    let ct = public.try_encrypt_with_rng(&mut rng, &params, b"stable").unwrap();
    // Every decryption advances the blinding state; the plaintext must not.
    for _i in 0..10 {
        let pt = private.try_decrypt_with_rng(&mut rng, &params, &ct).unwrap();
        assert_eq!(pt, b"stable");
    }
}


#[test]
fn test_private_key_shared_across_threads() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(111);
    let (public, private) = KeyFactory::Carmichael
        .try_generate_with_rng(&mut rng, 1024, ExponentPolicy::Default)
        .unwrap();
    let params = OaepParams::default();
    let ct = public.try_encrypt_with_rng(&mut rng, &params, b"shared").unwrap();

    let key = std::sync::Arc::new(private);
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let key = key.clone();
            let ct = ct.clone();
            std::thread::spawn(move || {
                let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
                for _i in 0..5 {
                    let pt = key.try_decrypt_with_rng(&mut rng, &params, &ct).unwrap();
                    assert_eq!(pt, b"shared");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}


#[test]
fn test_der_round_trips_and_cross_format() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(222);
    let (public, private) = KeyFactory::Carmichael
        .try_generate_with_rng(&mut rng, 1024, ExponentPolicy::Default)
        .unwrap();

    // Public PKCS #1
    let pub_der = public.try_to_der(EncodingScheme::Pkcs1).unwrap();
    assert_eq!(PublicKey::try_from_der(&pub_der, EncodingScheme::Pkcs1).unwrap(), public);

    // Private PKCS #1 and PKCS #8 recover every component
    for scheme in [EncodingScheme::Pkcs1, EncodingScheme::Pkcs8] {
        let der = private.try_to_der(scheme).unwrap();
        let back = PrivateKey::try_from_der(&der, scheme).unwrap();
        assert!(back.validate_vartime());
        assert_eq!(back.modulus(), private.modulus());
        assert_eq!(back.public_exponent(), private.public_exponent());
        assert_eq!(back.private_exponent(), private.private_exponent());
        assert_eq!(back.prime_p(), private.prime_p());
        assert_eq!(back.prime_q(), private.prime_q());
        assert_eq!(back.crt(), private.crt());
    }

    // The PKCS #8 OCTET STRING payload is itself the PKCS #1 encoding.
    let pkcs8 = private.try_to_der(EncodingScheme::Pkcs8).unwrap();
    let pkcs1 = private.try_to_der(EncodingScheme::Pkcs1).unwrap();
    let pos = pkcs8
        .windows(pkcs1.len())
        .position(|w| w == &pkcs1[..])
        .expect("inner PKCS #1 body not found");
    let inner = &pkcs8[pos..pos + pkcs1.len()];
    assert_eq!(PrivateKey::try_from_der(inner, EncodingScheme::Pkcs1).unwrap(), private);
}


#[test]
fn test_fixed_pkcs8_vector_decodes() {
    // A fixed toy key (p = 61, q = 53, e = 17, d = 413) encoded by this
    // crate; the encoding must stay byte-stable for interoperability.
    let key = {
        let n = num_bigint::BigUint::from(3233u32);
        let e = num_bigint::BigUint::from(17u32);
        let d = num_bigint::BigUint::from(413u32);
        let p = num_bigint::BigUint::from(61u32);
        let q = num_bigint::BigUint::from(53u32);
        PrivateKey::new(n, e, d, p, q).unwrap()
    };
    let der = key.try_to_der(EncodingScheme::Pkcs8).unwrap();
    let expected = hex::decode(concat!(
        "3033",     // PrivateKeyInfo SEQUENCE
        "020100",   // version 0
        "300d06092a864886f70d0101010500", // rsaEncryption, NULL
        "041f",     // OCTET STRING
        "301d",     // RSAPrivateKey SEQUENCE
        "020100",   // version 0
        "02020ca1", // n = 3233
        "020111",   // e = 17
        "0202019d", // d = 413
        "02013d",   // p = 61
        "020135",   // q = 53
        "020135",   // dP = 413 mod 60 = 53
        "020131",   // dQ = 413 mod 52 = 49
        "020126",   // qInv = 38
    ))
    .unwrap();
    assert_eq!(der, expected);
    assert_eq!(PrivateKey::try_from_der(&der, EncodingScheme::Pkcs8).unwrap(), key);
}


#[test]
fn test_exponent_coprimality_both_factories() {
    use num_integer::Integer;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(333);
    for factory in [KeyFactory::Carmichael, KeyFactory::Euler] {
        let (public, private) = factory
            .try_generate_with_rng(&mut rng, 1024, ExponentPolicy::Default)
            .unwrap();
        let p1 = private.prime_p() - 1u32;
        let q1 = private.prime_q() - 1u32;
        let lambda = p1.lcm(&q1);
        let phi = &p1 * &q1;
        let one = num_bigint::BigUint::from(1u8);
        assert_eq!(public.exponent().gcd(&lambda), one);
        assert_eq!(public.exponent().gcd(&phi), one);
    }
}


#[test]
#[ignore] // slow: strict policy at 2048 bits; run with `cargo test -- --ignored`
fn test_strict_policy_2048() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(444);
    let (public, private) = KeyFactory::Carmichael
        .try_generate_with_rng(&mut rng, 2048, ExponentPolicy::RandomStrict)
        .unwrap();
    use num_integer::Integer;
    assert_eq!(public.modulus_bits(), 2048);
    assert!(public.exponent().is_odd());
    assert!(public.exponent() > &(num_bigint::BigUint::from(1u32) << 16));
    assert!(public.exponent() < &(num_bigint::BigUint::from(1u32) << 256));
    assert!(private.private_exponent() > &(num_bigint::BigUint::from(1u32) << 1024));

    // The keypair works end to end.
    let params = OaepParams::default();
    let ct = public.try_encrypt_with_rng(&mut rng, &params, b"strict").unwrap();
    assert_eq!(private.try_decrypt_with_rng(&mut rng, &params, &ct).unwrap(), b"strict");
}

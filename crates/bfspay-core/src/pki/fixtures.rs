//! Test-only RSA keys and certificates, generated once per test binary.

use openssl::asn1::Asn1Time;
use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::rsa::Rsa;
use openssl::x509::{X509NameBuilder, X509};
use std::sync::OnceLock;

fn generate() -> Vec<u8> {
    let rsa = Rsa::generate(2048).unwrap();
    PKey::from_rsa(rsa).unwrap().private_key_to_pem_pkcs8().unwrap()
}

/// Merchant private key (PKCS#8 PEM).
pub(crate) fn merchant_key() -> &'static [u8] {
    static KEY: OnceLock<Vec<u8>> = OnceLock::new();
    KEY.get_or_init(generate)
}

/// A second, unrelated private key.
pub(crate) fn other_key() -> &'static [u8] {
    static KEY: OnceLock<Vec<u8>> = OnceLock::new();
    KEY.get_or_init(generate)
}

/// Public key PEM for a private key PEM.
pub(crate) fn public_pem(private_pem: &[u8]) -> Vec<u8> {
    PKey::private_key_from_pem(private_pem)
        .unwrap()
        .public_key_to_pem()
        .unwrap()
}

/// Self-signed certificate for a private key PEM.
pub(crate) fn certificate(private_pem: &[u8]) -> X509 {
    let pkey = PKey::private_key_from_pem(private_pem).unwrap();
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "BFS Test").unwrap();
    let name = name.build();
    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&pkey).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder.sign(&pkey, MessageDigest::sha256()).unwrap();
    builder.build()
}

//! RSA key pairs for the merchant and the bank.

use bfspay_core::pki::{Signer, Verifier};
use openssl::pkey::PKey;
use openssl::rsa::Rsa;

pub struct KeyPair {
    pub private_pem: Vec<u8>,
    pub public_pem: Vec<u8>,
}

impl KeyPair {
    pub fn generate() -> Self {
        let pkey = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
        Self {
            private_pem: pkey.private_key_to_pem_pkcs8().unwrap(),
            public_pem: pkey.public_key_to_pem().unwrap(),
        }
    }

    pub fn signer(&self) -> Signer {
        Signer::from_pem(&self.private_pem).unwrap()
    }

    pub fn verifier(&self) -> Verifier {
        Verifier::from_pem(&self.public_pem).unwrap()
    }
}

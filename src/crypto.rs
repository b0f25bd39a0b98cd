//! Symmetric encryption of persisted documents
//!
//! The key is the SHA-256 digest of the passphrase, used for AES-256 in ECB mode with PKCS#7 padding, and the
//! ciphertext is stored as standard base64.
//! This is what files written by earlier versions of this program contain, so it is kept for compatibility.
//! Note that ECB is deterministic and unauthenticated: identical plaintext blocks give identical ciphertext blocks,
//! and tampering is only detected when it breaks the padding or the decoding of the result.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;
type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;

/// Derive a 256-bit key from a passphrase
fn derive_key(passphrase: &str) -> [u8; 32] {
    Sha256::digest(passphrase.as_bytes()).into()
}

/// Encrypt a text, and return its base64 representation
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    let key = derive_key(passphrase);
    let cipher = Aes256EcbEnc::new_from_slice(&key)
        .map_err(|err| Error::Crypto(format!("invalid key: {}", err)))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    Ok(STANDARD.encode(ciphertext))
}

/// Reverse [`encrypt`]
///
/// A wrong passphrase is (almost always) detected by an invalid padding or an invalid UTF-8 result.
pub fn decrypt(encoded: &str, passphrase: &str) -> Result<String> {
    let ciphertext = STANDARD.decode(encoded.trim())
        .map_err(|err| Error::Crypto(format!("invalid base64: {}", err)))?;

    let key = derive_key(passphrase);
    let cipher = Aes256EcbDec::new_from_slice(&key)
        .map_err(|err| Error::Crypto(format!("invalid key: {}", err)))?;
    let plaintext = cipher.decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| Error::Crypto("unable to decrypt (wrong passphrase or corrupted data)".to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| Error::Crypto("decrypted data is not valid UTF-8 (wrong passphrase?)".to_string()))
}

use sha2::{Digest, Sha512};

/// Hex-encoded SHA-512 of `password`, the form the imaging agent compares against.
pub fn digest_password(password: &str) -> String {
  let mut hasher = Sha512::new();
  hasher.update(password.as_bytes());
  hex::encode(hasher.finalize())
}

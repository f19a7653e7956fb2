//! Reversible XOR obfuscation of stored passwords.
//!
//! Each byte is XOR-ed with the secret, cycled from its start on every call.
//! When the result would be NUL or whitespace the plaintext byte is kept, so
//! stored text never carries control characters.
//!
//! The transform is its own inverse except when a plaintext byte is itself
//! NUL or whitespace: such a byte XORs to a printable one on the way in and
//! is skipped on the way out. Passwords pass the no-whitespace name rule, so
//! stored passwords always round trip. The masked bytes are base64 encoded
//! for storage, so any UTF-8 password is accepted. This is obfuscation, not
//! a credential hash.

use std::fmt;
use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use umgate_types::utils::is_space;

/// Secret used when the options do not set one
pub const DEFAULT_SECRET: &str = "*j7a(L#yZ98sSd5HfSgGjMj8;Ss;d)(*&^#@$a2s0i3g";

#[derive(Clone)]
pub struct Obfuscator {
	secret: Arc<[u8]>,
}

impl fmt::Debug for Obfuscator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Obfuscator").field("secret_len", &self.secret.len()).finish()
	}
}

impl Default for Obfuscator {
	fn default() -> Self {
		Self::new(DEFAULT_SECRET.as_bytes())
	}
}

impl Obfuscator {
	pub fn new(secret: &[u8]) -> Self {
		Self { secret: secret.into() }
	}

	/// Apply the transform once. An empty secret leaves the input unchanged.
	pub fn transform(&self, input: &[u8]) -> Vec<u8> {
		if self.secret.is_empty() {
			return input.to_vec();
		}
		input
			.iter()
			.zip(self.secret.iter().cycle())
			.map(|(&plain, &mask)| {
				let masked = plain ^ mask;
				if masked != 0 && !is_space(masked) { masked } else { plain }
			})
			.collect()
	}

	/// Obfuscate a password for storage
	pub fn conceal(&self, password: &str) -> String {
		URL_SAFE_NO_PAD.encode(self.transform(password.as_bytes()))
	}

	/// Recover a stored password. `None` if the stored text does not decode.
	pub fn reveal(&self, stored: &str) -> Option<String> {
		let masked = URL_SAFE_NO_PAD.decode(stored).ok()?;
		String::from_utf8(self.transform(&masked)).ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_round_trip() {
		let ob = Obfuscator::default();
		for password in ["secret", "P@ssw0rd!", "x", "a-much-longer-password-than-the-secret-itself-0123456789"] {
			let stored = ob.conceal(password);
			assert_ne!(stored, password);
			assert_eq!(ob.reveal(&stored).as_deref(), Some(password));
		}
	}

	#[test]
	fn test_no_control_bytes_in_output() {
		let ob = Obfuscator::default();
		let input: Vec<u8> = (0x21..0x7f).collect();
		let out = ob.transform(&input);
		assert_eq!(out.len(), input.len());
		assert!(out.iter().all(|&b| b != 0 && !is_space(b)));
	}

	#[test]
	fn test_zero_result_keeps_plain_byte() {
		// '*' XOR '*' would be NUL
		let ob = Obfuscator::default();
		assert_eq!(ob.transform(b"*"), b"*");
		assert_eq!(ob.transform(&ob.transform(b"*")), b"*");
	}

	#[test]
	fn test_whitespace_result_keeps_plain_byte() {
		// ' ' XOR '*' is '\n'
		let ob = Obfuscator::default();
		assert_eq!(ob.transform(b" "), b" ");
	}

	#[test]
	fn test_lossy_when_plain_byte_is_whitespace() {
		// '\t' XOR '*' is '#', and '#' XOR '*' is '\t' again, which is skipped
		let ob = Obfuscator::default();
		let once = ob.transform(b"\t");
		assert_eq!(once, b"#");
		assert_eq!(ob.transform(&once), b"#");

		// Same at the second position: ' ' XOR 'j' is 'J'
		let once = ob.transform(b"x ");
		assert_eq!(once, b"RJ");
		assert_eq!(ob.transform(&once), b"xJ");
	}

	#[test]
	fn test_secret_cycles_from_start_each_call() {
		let ob = Obfuscator::new(b"ab");
		assert_eq!(ob.transform(b"AAA"), ob.transform(b"AAA"));
		// 'A'^'a' = ' ' is skipped, 'A'^'b' = '#'
		assert_eq!(ob.transform(b"AAA"), b"A#A");
	}

	#[test]
	fn test_empty_secret_is_identity() {
		let ob = Obfuscator::new(b"");
		assert_eq!(ob.transform(b"abc"), b"abc");
	}

	#[test]
	fn test_non_ascii_round_trip() {
		// 0xC3 ^ 0x40 = 0x83, a lone continuation byte
		let ob = Obfuscator::new(&[0x40]);
		let stored = ob.conceal("é");
		assert_eq!(ob.reveal(&stored).as_deref(), Some("é"));

		let ob = Obfuscator::default();
		for password in ["pässwort", "пароль", "密码", "a\u{a0}b"] {
			assert_eq!(ob.reveal(&ob.conceal(password)).as_deref(), Some(password));
		}
	}

	#[test]
	fn test_reveal_rejects_garbage() {
		let ob = Obfuscator::default();
		assert_eq!(ob.reveal("not base64!"), None);
	}
}

// vim: ts=4

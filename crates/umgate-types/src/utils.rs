//! Utility functions

/// `isspace` in the C locale: space, \t, \n, \v, \f, \r
pub fn is_space(b: u8) -> bool {
	b.is_ascii_whitespace() || b == 0x0b
}

/// Entity key rule shared by user names, group names and passwords:
/// non-empty and no C-locale whitespace byte. Unicode spaces such as
/// U+00A0 are allowed.
pub fn check_name(name: &str) -> bool {
	!name.is_empty() && !name.bytes().any(is_space)
}


// vim: ts=4

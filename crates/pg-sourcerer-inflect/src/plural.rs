//! English pluralization/singularization covering the catalog-identifier
//! vocabulary this engine actually sees (simple nouns, no heck dependency
//! since `heck` has no plural support to begin with).

const IRREGULAR: &[(&str, &str)] = &[
	("person", "people"),
	("child", "children"),
	("man", "men"),
	("woman", "women"),
	("tooth", "teeth"),
	("foot", "feet"),
	("mouse", "mice"),
	("goose", "geese"),
	("datum", "data"),
	("status", "statuses"),
];

/// `user` -> `users`, `category` -> `categories`, `status` -> `statuses`.
pub fn pluralize(word: &str) -> String {
	let lower = word.to_lowercase();
	for (singular, plural) in IRREGULAR {
		if lower == *singular {
			return match_case(word, plural);
		}
	}
	if lower.ends_with('y')
		&& lower
			.chars()
			.nth(lower.len().saturating_sub(2))
			.map(|c| !is_vowel(c))
			.unwrap_or(false)
	{
		return format!("{}ies", &word[..word.len() - 1]);
	}
	if lower.ends_with('s')
		|| lower.ends_with('x')
		|| lower.ends_with('z')
		|| lower.ends_with("ch")
		|| lower.ends_with("sh")
	{
		return format!("{word}es");
	}
	format!("{word}s")
}

/// `users` -> `user`, `categories` -> `category`, `statuses` -> `status`.
pub fn singularize(word: &str) -> String {
	let lower = word.to_lowercase();
	for (singular, plural) in IRREGULAR {
		if lower == *plural {
			return match_case(word, singular);
		}
	}
	if lower.ends_with("ies") && word.len() > 3 {
		return format!("{}y", &word[..word.len() - 3]);
	}
	if lower.ends_with("ses") || lower.ends_with("xes") || lower.ends_with("zes") || lower.ends_with("ches") || lower.ends_with("shes") {
		return word[..word.len() - 2].to_string();
	}
	if lower.ends_with('s') && !lower.ends_with("ss") {
		return word[..word.len() - 1].to_string();
	}
	word.to_string()
}

fn is_vowel(c: char) -> bool {
	matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn match_case(original: &str, replacement: &str) -> String {
	if original.chars().next().is_some_and(char::is_uppercase) {
		let mut chars = replacement.chars();
		match chars.next() {
			Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
			None => String::new(),
		}
	} else {
		replacement.to_string()
	}
}

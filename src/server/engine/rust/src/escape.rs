/* src/server/engine/rust/src/escape.rs */

/// Escape text for HTML element content and double-quoted attribute values.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

/// Make serialized JSON safe to embed in a `<script type="application/json">`
/// block and byte-stable across encodings.
///
/// Inside JSON strings, non-ASCII codepoints become `\uXXXX` (surrogate pairs
/// outside the BMP) and `<`, `>`, `&` become their `\u` forms so no string
/// value can close the script element. Text outside strings is copied as is.
pub fn ascii_escape_json(json: &str) -> String {
  let mut out = String::with_capacity(json.len());
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    if !in_string {
      if ch == '"' {
        in_string = true;
      }
      out.push(ch);
      continue;
    }

    match ch {
      '\\' => {
        out.push(ch);
        if let Some(next) = chars.next() {
          out.push(next);
        }
      }
      '"' => {
        in_string = false;
        out.push(ch);
      }
      '<' | '>' | '&' => push_unit(&mut out, ch as u32),
      c if c.is_ascii() => out.push(c),
      c => {
        let code = c as u32;
        if code > 0xFFFF {
          let adjusted = code - 0x1_0000;
          push_unit(&mut out, (adjusted >> 10) + 0xD800);
          push_unit(&mut out, (adjusted & 0x3FF) + 0xDC00);
        } else {
          push_unit(&mut out, code);
        }
      }
    }
  }
  out
}

fn push_unit(out: &mut String, unit: u32) {
  out.push_str(&format!("\\u{unit:04x}"));
}

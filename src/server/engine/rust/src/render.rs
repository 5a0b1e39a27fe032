/* src/server/engine/rust/src/render.rs */

use folio_server::contact::{ContactField, MESSAGE_MIN_LEN, PHONE_PATTERN};
use folio_server::dictionary::{FormText, MenuText};
use folio_server::{
  Carousel, Locale, PROJECTS, SLIDES, SectionId, THEME_PARAM, Theme, switch_locale_path,
};

use crate::escape::escape_html;
use crate::page::{
  PORTRAIT_SRC, PageContext, RESUME_DOWNLOAD_NAME, RESUME_HREF, SITE_DESCRIPTION, SITE_TITLE,
  SKILL_ICONS_SRC, SOCIAL_LINKS, build_folio_data, data_script,
};

/// Render the whole single page for one locale: menu, the seven sections,
/// and the hydration data script.
pub fn render_page(ctx: &PageContext<'_>) -> String {
  let dir = ctx.locale.direction().as_str();
  let class = ctx.theme.html_class().map(|c| format!(" class=\"{c}\"")).unwrap_or_default();
  let mut html = String::with_capacity(16 * 1024);
  html.push_str(&format!(
    "<!DOCTYPE html><html lang=\"{}\" dir=\"{dir}\"{class} data-theme=\"{}\"><head>\
     <meta charset=\"utf-8\">\
     <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
     <title>{SITE_TITLE}</title><meta name=\"description\" content=\"{SITE_DESCRIPTION}\">\
     <link rel=\"stylesheet\" href=\"/styles.css\"></head><body>",
    ctx.locale, ctx.theme
  ));

  render_menu(&mut html, ctx);
  html.push_str("<main>");
  for id in SectionId::ALL {
    render_section(&mut html, ctx, id);
  }
  html.push_str("</main>");

  html.push_str(&data_script(&build_folio_data(ctx)));
  html.push_str("<script src=\"/folio.js\" defer></script></body></html>");
  html
}

fn render_menu(html: &mut String, ctx: &PageContext<'_>) {
  let menu: &MenuText = &ctx.dictionary.menu;
  html.push_str(&format!(
    "<nav id=\"menu\"><div class=\"brand\">\
     <img src=\"{PORTRAIT_SRC}\" width=\"50\" height=\"50\" alt=\"{name}\">\
     <span>{name}</span></div>",
    name = escape_html(&menu.name)
  ));

  render_theme_toggle(html, ctx);

  html.push_str("<ul class=\"locale-switcher\">");
  for locale in Locale::ALL {
    let current =
      if locale == ctx.locale { " class=\"active\" aria-current=\"true\"" } else { "" };
    html.push_str(&format!(
      "<li><a href=\"{}\" hreflang=\"{locale}\"{current}>{locale}</a></li>",
      escape_html(&switch_locale_path(ctx.path, locale))
    ));
  }
  html.push_str("</ul>");

  // Collapsed on first paint; the client flips aria-expanded and the list's hidden class.
  html.push_str(
    "<button type=\"button\" class=\"menu-toggle\" aria-controls=\"navbar-default\" \
     aria-expanded=\"false\"><span class=\"sr-only\">Open main menu</span></button>",
  );

  html.push_str("<ul id=\"navbar-default\" class=\"collapsed\">");
  for id in SectionId::ALL {
    let href = if id == SectionId::Home { "#".to_string() } else { format!("#{id}") };
    let mut attrs = String::new();
    if id == ctx.active {
      attrs.push_str(" class=\"active\"");
    }
    if id == SectionId::Home {
      attrs.push_str(" aria-current=\"page\"");
    }
    html.push_str(&format!(
      "<li><a href=\"{href}\" data-section=\"{id}\"{attrs}>{}</a></li>",
      escape_html(id.menu_label(menu))
    ));
  }
  html.push_str("</ul></nav>");
}

/// Light / dark / system links. Each works without script: the page route
/// reads `?theme=` and remembers it in a cookie.
fn render_theme_toggle(html: &mut String, ctx: &PageContext<'_>) {
  html.push_str("<div class=\"mode-toggle\" role=\"group\" aria-label=\"Toggle theme\">");
  for theme in Theme::ALL {
    let pressed = theme == ctx.theme;
    let class = if pressed { " class=\"active\"" } else { "" };
    html.push_str(&format!(
      "<a href=\"?{THEME_PARAM}={theme}\" data-theme=\"{theme}\" \
       aria-pressed=\"{pressed}\"{class}>{}</a>",
      theme.label()
    ));
  }
  html.push_str("</div>");
}

fn render_section(html: &mut String, ctx: &PageContext<'_>, id: SectionId) {
  let dir = ctx.locale.direction().as_str();
  let content = &ctx.dictionary.content;
  html.push_str(&format!("<section id=\"{id}\">"));

  match id {
    SectionId::Home => {
      let carousel = Carousel::default();
      html.push_str(&format!(
        "<div class=\"slider\"><div class=\"slider-track\" \
         style=\"transform: translateX(-{}%)\">",
        carousel.offset_percent()
      ));
      for (i, src) in SLIDES.iter().enumerate() {
        html.push_str(&format!("<img src=\"{src}\" alt=\"slide {}\">", i + 1));
      }
      html.push_str("</div><div class=\"slider-bullets\">");
      for i in 0..carousel.len() {
        let active = if i == carousel.current() { " class=\"active\"" } else { "" };
        html.push_str(&format!(
          "<button type=\"button\" data-slide=\"{i}\" aria-label=\"slide {}\"{active}></button>",
          i + 1
        ));
      }
      html.push_str("</div></div>");
    }
    SectionId::About => {
      let about = &content.about;
      html.push_str(&format!(
        "<div class=\"portrait\"><img id=\"portrait\" src=\"{PORTRAIT_SRC}\" \
         width=\"400\" height=\"450\" alt=\"{}\"></div>",
        escape_html(&about.values.name)
      ));
      html.push_str(&format!(
        "<div dir=\"{dir}\"><h1>{}</h1><h2>{}</h2><p>{}</p><dl class=\"facts\">",
        escape_html(&about.title),
        escape_html(&about.main),
        escape_html(&about.text)
      ));
      for (key, value) in about.keys.entries().into_iter().zip(about.values.entries()) {
        html.push_str(&format!(
          "<dt>{}</dt><dd>{}</dd>",
          escape_html(key),
          escape_html(value)
        ));
      }
      html.push_str("</dl></div>");
    }
    SectionId::Resume => {
      let resume = &content.resume;
      html.push_str(&format!(
        "<div dir=\"{dir}\"><h1>{}</h1><ol>",
        escape_html(&resume.title)
      ));
      for (key, value) in resume.keys.entries().into_iter().zip(resume.values.entries()) {
        html.push_str(&format!(
          "<li><h2>{}</h2><p>{}</p></li>",
          escape_html(key),
          escape_html(value)
        ));
      }
      html.push_str(&format!(
        "</ol><a class=\"download\" href=\"{RESUME_HREF}\" \
         download=\"{RESUME_DOWNLOAD_NAME}\">{}</a></div>",
        escape_html(&resume.download)
      ));
    }
    SectionId::Skills => {
      html.push_str(&format!(
        "<div dir=\"{dir}\"><h1>{}</h1>\
         <img class=\"skills\" src=\"{}\" alt=\"My Skills\"></div>",
        escape_html(&content.skills.title),
        escape_html(SKILL_ICONS_SRC)
      ));
    }
    SectionId::Projects => {
      html.push_str(&format!(
        "<h1>{}</h1><div class=\"projects\">",
        escape_html(&content.projects.title)
      ));
      for (index, project) in PROJECTS.iter().enumerate() {
        html.push_str(&format!(
          "<article class=\"project\"><h2>{}</h2><p dir=\"{dir}\" data-key=\"{}\">{}</p>\
           <video controls preload=\"metadata\" data-index=\"{index}\">\
           <source src=\"{}\" type=\"video/mp4\"></video></article>",
          escape_html(project.title),
          project.description_key(),
          escape_html(project.description(&content.projects.descriptions)),
          project.video_url
        ));
      }
      html.push_str("</div>");
    }
    SectionId::Services => {
      let services = &content.services;
      html.push_str(&format!(
        "<div dir=\"{dir}\"><h1>{}</h1><h2>{}</h2><ol>",
        escape_html(&services.title),
        escape_html(&services.subtitle)
      ));
      for service in services.text.entries() {
        html.push_str(&format!("<li><p>{}</p></li>", escape_html(service)));
      }
      html.push_str("</ol></div>");
    }
    SectionId::Contact => {
      html.push_str(&format!(
        "<h1>{}</h1><div class=\"contact\"><div id=\"map\" data-zoom=\"11\"></div>",
        escape_html(&content.contact.title)
      ));
      render_contact_form(html, &ctx.dictionary.form, dir);
      html.push_str("</div><div class=\"social\">");
      for link in SOCIAL_LINKS {
        let target =
          if link.external { " target=\"_blank\" rel=\"noopener noreferrer\"" } else { "" };
        html.push_str(&format!(
          "<a href=\"{}\"{target}>\
           <img src=\"{}\" alt=\"{label}\" width=\"30\" height=\"30\"><p>{label}</p></a>",
          escape_html(link.href),
          link.icon,
          label = link.label
        ));
      }
      html.push_str("</div>");
    }
  }

  html.push_str("</section>");
}

/// The form carries its validation rules as native attributes, so the browser
/// gates a plain submit, and its localized messages as data attributes for
/// the client script.
fn render_contact_form(html: &mut String, form: &FormText, dir: &str) {
  html.push_str(&format!(
    "<form id=\"contact-form\" method=\"post\" action=\"/api/contact\" dir=\"{dir}\" \
     data-success=\"{}\" data-error=\"{}\">",
    escape_html(&form.messages.success),
    escape_html(&form.messages.error)
  ));

  for field in ContactField::ALL {
    let name = field.as_str();
    let (label, placeholder) = match field {
      ContactField::FullName => (&form.full_name, &form.place_holder.full_name),
      ContactField::Email => (&form.email, &form.place_holder.email),
      ContactField::PhoneNumber => (&form.phone_number, &form.place_holder.phone_number),
      ContactField::Message => (&form.message, &form.place_holder.message),
    };
    let errors = &form.errors;
    let (rules, required_msg, invalid_msg) = match field {
      ContactField::FullName => ("type=\"text\"".to_string(), &errors.full_name, None),
      ContactField::Email => (
        "type=\"email\"".to_string(),
        &errors.email.required,
        Some(&errors.email.invalid_email),
      ),
      ContactField::PhoneNumber => (
        format!("type=\"tel\" inputmode=\"numeric\" pattern=\"{PHONE_PATTERN}\""),
        &errors.phone_number.required,
        Some(&errors.phone_number.invalid_number),
      ),
      ContactField::Message => (
        format!("minlength=\"{MESSAGE_MIN_LEN}\""),
        &errors.message.required,
        Some(&errors.message.min_length),
      ),
    };
    let invalid_attr = invalid_msg
      .map(|msg| format!(" data-invalid=\"{}\"", escape_html(msg)))
      .unwrap_or_default();
    let common = format!(
      "id=\"{name}\" name=\"{name}\" {rules} required placeholder=\"{}\" \
       data-required=\"{}\"{invalid_attr}",
      escape_html(placeholder),
      escape_html(required_msg)
    );

    html.push_str(&format!(
      "<div class=\"field\"><label for=\"{name}\">{}</label>",
      escape_html(label)
    ));
    if field == ContactField::Message {
      html.push_str(&format!("<textarea {common}></textarea>"));
    } else {
      html.push_str(&format!("<input {common}>"));
    }
    html.push_str(&format!("<p class=\"field-error\" data-for=\"{name}\" hidden></p></div>"));
  }

  html.push_str(&format!(
    "<button type=\"submit\" data-sending=\"{}\">{}</button></form>",
    escape_html(&form.submit.sending),
    escape_html(&form.submit.submit)
  ));
}

#[cfg(test)]
mod tests {
  use folio_server::{BundledSource, Dictionary};

  use super::*;
  use crate::page::DATA_ID;

  fn bundled(locale: Locale) -> Dictionary {
    Dictionary::from_json(locale, BundledSource::raw(locale)).unwrap()
  }

  fn render(locale: Locale, path: &str) -> String {
    let dict = bundled(locale);
    render_page(&PageContext::new(locale, &dict, path))
  }

  fn extract_data(html: &str) -> serde_json::Value {
    let open = format!("<script id=\"{DATA_ID}\" type=\"application/json\">");
    let start = html.find(&open).unwrap() + open.len();
    let end = start + html[start..].find("</script>").unwrap();
    serde_json::from_str(&html[start..end]).unwrap()
  }

  #[test]
  fn english_page_is_ltr() {
    let html = render(Locale::En, "/en");
    assert!(
      html.starts_with("<!DOCTYPE html><html lang=\"en\" dir=\"ltr\" data-theme=\"system\">")
    );
    assert!(html.contains(">Home</a>"));
    assert!(html.contains("<h1>About Me</h1>"));
  }

  #[test]
  fn farsi_page_is_rtl() {
    let html = render(Locale::Fa, "/fa");
    assert!(html.contains("<html lang=\"fa\" dir=\"rtl\""));
    assert!(html.contains(">خانه</a>"));
    assert!(html.contains("action=\"/api/contact\" dir=\"rtl\""));
  }

  #[test]
  fn every_section_rendered_in_order() {
    let html = render(Locale::En, "/en");
    let positions: Vec<usize> = SectionId::ALL
      .iter()
      .map(|id| html.find(&format!("<section id=\"{id}\">")).unwrap())
      .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(html.contains("id=\"portrait\""));
    assert!(html.contains("<div id=\"map\""));
  }

  #[test]
  fn active_section_highlighted() {
    let dict = bundled(Locale::En);
    let ctx =
      PageContext { active: SectionId::Services, ..PageContext::new(Locale::En, &dict, "/en") };
    let html = render_page(&ctx);
    assert!(html.contains("<a href=\"#services\" data-section=\"services\" class=\"active\">"));
    assert!(html.contains("<a href=\"#\" data-section=\"home\" aria-current=\"page\">"));
  }

  #[test]
  fn language_switcher_rewrites_locale_segment() {
    let html = render(Locale::Fa, "/fa");
    assert!(html.contains("<a href=\"/en\" hreflang=\"en\">en</a>"));
    assert!(
      html.contains("<a href=\"/fa\" hreflang=\"fa\" class=\"active\" aria-current=\"true\">fa</a>")
    );
  }

  #[test]
  fn form_carries_native_constraints() {
    let html = render(Locale::En, "/en");
    assert!(html.contains("name=\"email\" type=\"email\" required"));
    assert!(html.contains("pattern=\"[0-9]{11,14}\""));
    assert!(html.contains("minlength=\"10\""));
    assert!(html.contains("<textarea id=\"message\" name=\"message\""));
    assert_eq!(html.matches(" required ").count(), 4);
  }

  #[test]
  fn plain_submit_is_enabled() {
    let html = render(Locale::En, "/en");
    assert!(html.contains("<form id=\"contact-form\" method=\"post\" action=\"/api/contact\""));
    assert!(html.contains("<button type=\"submit\" data-sending="));
    assert!(!html.contains("disabled"));
  }

  #[test]
  fn explicit_theme_marks_html_and_toggle() {
    let dict = bundled(Locale::En);
    let html = render_page(&PageContext::new(Locale::En, &dict, "/en").with_theme(Theme::Dark));
    assert!(html.contains("<html lang=\"en\" dir=\"ltr\" class=\"dark\" data-theme=\"dark\">"));
    assert!(html.contains(
      "<a href=\"?theme=dark\" data-theme=\"dark\" aria-pressed=\"true\" class=\"active\">Dark</a>"
    ));
    assert!(html.contains("<a href=\"?theme=light\" data-theme=\"light\" aria-pressed=\"false\">"));
  }

  #[test]
  fn system_theme_leaves_html_classless() {
    let html = render(Locale::Fa, "/fa");
    assert!(html.contains("dir=\"rtl\" data-theme=\"system\">"));
    assert!(
      html.contains("data-theme=\"system\" aria-pressed=\"true\" class=\"active\">System</a>")
    );
  }

  #[test]
  fn mobile_menu_starts_collapsed() {
    let html = render(Locale::En, "/en");
    assert!(html.contains("aria-controls=\"navbar-default\" aria-expanded=\"false\""));
    assert!(html.contains("<ul id=\"navbar-default\" class=\"collapsed\">"));
  }

  #[test]
  fn projects_and_slides() {
    let html = render(Locale::En, "/en");
    for project in PROJECTS {
      assert!(html.contains(&format!("<source src=\"{}\" type=\"video/mp4\">", project.video_url)));
    }
    assert_eq!(html.matches("data-slide=").count(), 5);
    assert!(html.contains("style=\"transform: translateX(-0%)\""));
    for project in PROJECTS {
      assert!(html.contains(&format!("data-key=\"{}\"", project.description_key())));
    }
  }

  #[test]
  fn dictionary_text_is_escaped() {
    let mut dict = bundled(Locale::En);
    dict.content.about.title = "<script>alert(1)</script>".into();
    let html = render_page(&PageContext::new(Locale::En, &dict, "/en"));
    assert!(html.contains("<h1>&lt;script&gt;alert(1)&lt;/script&gt;</h1>"));
    assert!(!html.contains("<script>alert"));
  }

  #[test]
  fn data_script_parses() {
    let html = render(Locale::Fa, "/fa");
    let data = extract_data(&html);
    assert_eq!(data["locale"], "fa");
    assert_eq!(data["threshold"], 0.5);
    assert_eq!(data["reveals"].as_array().unwrap().len(), 9);
  }

  #[test]
  fn placeholder_dictionary_still_renders() {
    let dict = Dictionary::default();
    let html = render_page(&PageContext::new(Locale::En, &dict, "/en"));
    assert!(html.contains("<section id=\"contact\">"));
    assert!(html.ends_with("</body></html>"));
  }
}

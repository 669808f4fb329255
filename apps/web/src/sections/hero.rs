use crate::render::section;

pub fn render() -> String {
    section(
        Some("home"),
        "hero",
        r#"<div class="hero-copy" data-animate="stagger"><h1>Hot &amp; Ready Pizza Awaits!</h1><p>Experience the taste of PNE Pizza, your local Little Caesars franchise. Quality ingredients, fast service, and unbeatable prices!</p></div><div class="hero-art" data-animate="float"><img src="/pizza.png" alt="Delicious Pizza Slice"></div>"#,
    )
}

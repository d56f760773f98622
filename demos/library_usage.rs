use templatemaker::clean::{CleanMode, HtmlCleaner};
use templatemaker::template::DEFAULT_HOLE_TEXT;
use templatemaker::{Template, TemplateOptions, Tolerance};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let monday = b"<html><script>track(1)</script><h1>Chicago</h1><p>High: 71F</p></html>";
    let tuesday = b"<html><script>track(2)</script><h1>Denver</h1><p>High: 64F</p></html>";

    let opts = TemplateOptions {
        tolerance: Tolerance::new(1),
        clean: CleanMode::Html,
    };
    let template = Template::from_samples(monday, tuesday, &opts)?;
    println!(
        "template: {}",
        String::from_utf8_lossy(&template.as_text(DEFAULT_HOLE_TEXT.as_bytes()))
    );

    let wednesday = b"<html><script>track(3)</script><h1>Austin</h1><p>High: 98F</p></html>";
    let values = template.extract(wednesday, &HtmlCleaner)?;
    assert_eq!(values, vec![b"Austin".to_vec(), b"98".to_vec()]);

    let fields = template.extract_fields(wednesday, &HtmlCleaner, &[Some("city"), Some("high")])?;
    for (name, value) in &fields {
        println!("{name} = {}", String::from_utf8_lossy(value));
    }
    Ok(())
}

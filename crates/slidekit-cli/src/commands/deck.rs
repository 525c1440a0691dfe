use anyhow::Result;

use slidekit_core::slider::CategoryGrouping;
use slidekit_core::Deck;

pub fn run(deck: &Deck) -> Result<()> {
    if deck.projects.is_empty() && deck.testimonials.is_empty() {
        println!("Deck is empty.");
        return Ok(());
    }

    println!("Projects ({}):\n", deck.projects.len());
    for (id, project) in deck.projects.iter().enumerate() {
        let category = project.category.as_deref().unwrap_or("-");
        println!("  {:>2}. {} [{}]", id + 1, project.title, category);
        if let Some(body) = &project.body {
            println!("      {}", body);
        }
    }

    let grouping = CategoryGrouping::from_slides(&deck.project_slides());
    if !grouping.is_empty() {
        println!("\nCategories:");
        for category in grouping.categories() {
            let count = grouping.get(category).map_or(0, <[usize]>::len);
            println!("  {} ({})", category, count);
        }
    }

    println!("\nTestimonials ({}):\n", deck.testimonials.len());
    for testimonial in &deck.testimonials {
        println!("  {}", testimonial.title);
        if let Some(body) = &testimonial.body {
            println!("    \"{}\"", body);
        }
    }

    Ok(())
}

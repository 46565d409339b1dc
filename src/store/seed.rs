//! Sample data for a freshly started store.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::deal::DealMutation;

use super::DealStore;

/// Restaurant names sample deals are drawn from.
pub const RESTAURANTS: &[&str] = &[
    "Tasty Treats",
    "Yummy Delights",
    "Delicious Dishes",
    "Savory Bites",
    "Gourmet Grub",
    "Bite Labs",
    "Flavorsome Feast",
    "Hearty Meals",
    "Epicurean Eats",
    "Delectable Dining",
    "Crave Cuisine",
    "Mouthwatering Meals",
    "The Flavor Factory",
    "Palate Pleasures",
    "Taste Temptations",
    "Fusion Bites",
    "The Gourmet Spot",
    "Savory Selections",
    "Bistro Bliss",
    "Epicurean Delights",
    "Cuisine Creations",
    "The Flavor Studio",
    "Culinary Creations",
    "Heavenly Bites",
    "Taste Haven",
];

/// Dish names used as sample deal titles.
pub const DISHES: &[&str] = &[
    "Chicken Noodle Soup",
    "Rice Noodle with Beef",
    "Hot Chicken Wings",
    "Beef Burger",
    "Grilled Salmon",
    "Vegan Buddha Bowl",
    "Spaghetti Carbonara",
    "Margherita Pizza",
    "Chicken Caesar Salad",
    "BBQ Ribs",
    "Teriyaki Chicken",
    "Garlic Butter Shrimp",
    "Veggie Stir-Fry",
    "Beef Tacos",
    "Lamb Chops",
    "Pan-Seared Scallops",
    "Penne Alfredo",
    "Pulled Pork Sandwich",
    "Buffalo Chicken Wrap",
    "Chocolate Lava Cake",
    "Miso Soup",
    "Fish and Chips",
    "Eggplant Parmesan",
    "Chicken Fajitas",
    "Mushroom Risotto",
    "Steak Frites",
    "Grilled Cheese Sandwich",
    "Tom Yum Soup",
    "Falafel Wrap",
    "Lobster Roll",
    "Greek Salad",
    "Pork Schnitzel",
    "Stuffed Bell Peppers",
    "Coconut Curry Chicken",
    "Shrimp Tacos",
    "Beef Stroganoff",
    "Cheeseburger Sliders",
    "Baked Ziti",
    "Chicken Marsala",
    "Vegetable Paella",
    "Tuna Poke Bowl",
];

const MIN_PRICE: f64 = 1.0;
const MAX_PRICE: f64 = 10.0;

/// One random deal: a dish from a restaurant at a price in `[1, 10)`.
#[must_use]
pub fn sample_deal<R: Rng + ?Sized>(rng: &mut R) -> DealMutation {
    let title = DISHES.choose(rng).copied().unwrap_or_default();
    let restaurant = RESTAURANTS.choose(rng).copied().unwrap_or_default();
    let price = format!("{:.2}", rng.gen_range(MIN_PRICE..MAX_PRICE));
    DealMutation::new(title, restaurant, &price)
}

/// Insert `count` random deals into `store`.
pub fn populate<R: Rng + ?Sized>(store: &DealStore, count: usize, rng: &mut R) {
    for _ in 0..count {
        store.create(sample_deal(rng));
    }
}

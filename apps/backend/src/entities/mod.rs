pub mod categories;
pub mod ingredients;
pub mod recipe_categories;
pub mod recipe_ingredients;
pub mod recipes;
pub mod shelves;
pub mod stores;
pub mod users;

pub use categories::Entity as Categories;
pub use categories::Model as Category;
pub use ingredients::Entity as Ingredients;
pub use ingredients::Model as Ingredient;
pub use recipe_categories::Entity as RecipeCategories;
pub use recipe_ingredients::Entity as RecipeIngredients;
pub use recipes::Entity as Recipes;
pub use recipes::Model as Recipe;
pub use shelves::Entity as Shelves;
pub use stores::Entity as Stores;
pub use stores::Model as Store;
pub use users::Entity as Users;
pub use users::Model as User;

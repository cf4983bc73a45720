//! The component catalog.
//!
//! One entry per content component type, pairing schema, display metadata,
//! default properties, and the render function.

use crate::errors::RegistryError;
use crate::render::RenderOptions;
use crate::schema::{FieldKind, Schema};
use crate::templates;
use serde_json::{json, Value};
use sitewright_store::{PropertyMap, SiteComponent};
use sitewright_vdom::VNode;
use std::collections::BTreeMap;

/// Template render function for one component type
pub type RenderFn = fn(&PropertyMap, &RenderOptions) -> VNode;

/// Everything the editor knows about one component type
pub struct CatalogEntry {
    pub type_tag: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    /// Icon name shown in the component library sidebar
    pub icon: &'static str,
    pub schema: Schema,
    pub default_properties: PropertyMap,
    pub render: RenderFn,
}

/// Static, read-only catalog. Constructed once and shared by reference.
pub struct ComponentRegistry {
    entries: BTreeMap<&'static str, CatalogEntry>,
}

impl ComponentRegistry {
    /// The built-in component set
    pub fn builtin() -> Self {
        let mut registry = Self {
            entries: BTreeMap::new(),
        };
        for entry in builtin_entries() {
            registry.register(entry);
        }
        registry
    }

    fn register(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.type_tag, entry);
    }

    pub fn entry(&self, type_tag: &str) -> Option<&CatalogEntry> {
        self.entries.get(type_tag)
    }

    pub fn is_registered(&self, type_tag: &str) -> bool {
        self.entries.contains_key(type_tag)
    }

    /// All registered type tags, in stable order
    pub fn component_types(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Validation schema; permissive for unregistered types
    pub fn component_schema(&self, type_tag: &str) -> Schema {
        self.entry(type_tag)
            .map(|e| e.schema.clone())
            .unwrap_or_else(Schema::permissive)
    }

    /// Human label; falls back to the raw type tag
    pub fn display_name(&self, type_tag: &str) -> String {
        self.entry(type_tag)
            .map(|e| e.display_name.to_string())
            .unwrap_or_else(|| type_tag.to_string())
    }

    pub fn description(&self, type_tag: &str) -> String {
        self.entry(type_tag)
            .map(|e| e.description.to_string())
            .unwrap_or_else(|| "Component for your website".to_string())
    }

    pub fn icon(&self, type_tag: &str) -> String {
        self.entry(type_tag)
            .map(|e| e.icon.to_string())
            .unwrap_or_else(|| "Square".to_string())
    }

    /// Default property set; empty for unregistered types
    pub fn default_properties(&self, type_tag: &str) -> PropertyMap {
        self.entry(type_tag)
            .map(|e| e.default_properties.clone())
            .unwrap_or_default()
    }

    /// Build a component with the type's default properties. An
    /// unregistered type is an error; a registered type with empty defaults
    /// is valid and yields an empty property map.
    pub fn create_default_component(
        &self,
        type_tag: &str,
        component_id: impl Into<String>,
    ) -> Result<SiteComponent, RegistryError> {
        let entry = self
            .entry(type_tag)
            .ok_or_else(|| RegistryError::UnknownType(type_tag.to_string()))?;

        Ok(SiteComponent::new(component_id, entry.type_tag)
            .with_properties(entry.default_properties.clone()))
    }
}

fn props(value: Value) -> PropertyMap {
    match value {
        Value::Object(map) => map,
        _ => PropertyMap::new(),
    }
}

fn link_schema() -> Schema {
    Schema::new()
        .field("text", FieldKind::Text)
        .field("href", FieldKind::Url)
}

fn builtin_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            type_tag: "hero-section",
            display_name: "Hero Section",
            description: "A large banner with title, subtitle and call-to-action",
            icon: "Layout",
            schema: Schema::new()
                .field("title", FieldKind::Text)
                .field("subtitle", FieldKind::Text)
                .optional("buttonText", FieldKind::Text)
                .optional("buttonLink", FieldKind::Url)
                .optional("backgroundPattern", FieldKind::Url),
            default_properties: props(json!({
                "title": "Welcome to Our Website",
                "subtitle": "We're revolutionizing the future with innovative solutions",
                "buttonText": "Learn More",
                "buttonLink": "#about",
                "backgroundPattern": "/subtle-pattern.svg",
            })),
            render: templates::hero_section,
        },
        CatalogEntry {
            type_tag: "header",
            display_name: "Header",
            description: "Section header with title and subtitle",
            icon: "Type",
            schema: Schema::new()
                .field("title", FieldKind::Text)
                .optional("subtitle", FieldKind::Text)
                .optional("alignment", FieldKind::choice(&["left", "center", "right"]))
                .optional("size", FieldKind::choice(&["small", "medium", "large"])),
            default_properties: props(json!({
                "title": "New Section Header",
                "subtitle": "Add a subtitle here",
                "alignment": "center",
                "size": "medium",
            })),
            render: templates::header,
        },
        CatalogEntry {
            type_tag: "feature-section",
            display_name: "Feature Section",
            description: "Showcase a feature with image and text",
            icon: "Star",
            schema: Schema::new()
                .field("title", FieldKind::Text)
                .field("description", FieldKind::Text)
                .optional("image", FieldKind::Url)
                .optional("imageAlt", FieldKind::Text)
                .optional("buttonText", FieldKind::Text)
                .optional("buttonLink", FieldKind::Url)
                .optional("links", FieldKind::list(FieldKind::Object(link_schema())))
                .optional("reversed", FieldKind::Bool)
                .optional("delay", FieldKind::Number),
            default_properties: props(json!({
                "title": "Feature Title",
                "description": "Feature description goes here. Explain the benefits and value proposition.",
                "image": "/abstract-digital-pattern.png",
                "imageAlt": "Feature image",
                "buttonText": "Learn More",
                "buttonLink": "#",
                "reversed": false,
            })),
            render: templates::feature_section,
        },
        CatalogEntry {
            type_tag: "team-showcase",
            display_name: "Team Showcase",
            description: "Display team members with images and roles",
            icon: "Users",
            schema: Schema::new()
                .field("title", FieldKind::Text)
                .optional("layout", FieldKind::choice(&["grid", "list"]))
                .optional("columns", FieldKind::Number)
                .field(
                    "members",
                    FieldKind::list(FieldKind::Object(
                        Schema::new()
                            .field("name", FieldKind::Text)
                            .optional("role", FieldKind::Text)
                            .optional("title", FieldKind::Text)
                            .optional("image", FieldKind::Url)
                            .field("slug", FieldKind::Text)
                            .optional("href", FieldKind::Url)
                            .optional("bio", FieldKind::Text)
                            .optional("biography", FieldKind::list(FieldKind::Text))
                            .optional(
                                "socialLinks",
                                FieldKind::list(FieldKind::Object(
                                    Schema::new()
                                        .field("platform", FieldKind::Text)
                                        .field("url", FieldKind::Url),
                                )),
                            ),
                    )),
                ),
            default_properties: props(json!({
                "title": "Meet Our Visionary Team",
                "layout": "grid",
                "columns": 3,
                "members": [
                    {
                        "name": "John Doe",
                        "role": "CEO & Founder",
                        "image": "/professional-male-headshot.png",
                        "slug": "john-doe",
                        "bio": "John has over 15 years of experience in the industry.",
                    },
                    {
                        "name": "Jane Smith",
                        "role": "CTO",
                        "image": "/professional-headshot-female.png",
                        "slug": "jane-smith",
                        "bio": "Jane leads our technical team with expertise in AI and machine learning.",
                    },
                    {
                        "name": "Michael Johnson",
                        "role": "Design Director",
                        "image": "/diverse-male-headshot.png",
                        "slug": "michael-johnson",
                        "bio": "Michael brings creative vision to all our projects.",
                    },
                ],
            })),
            render: templates::team_showcase,
        },
        CatalogEntry {
            type_tag: "servicesList",
            display_name: "Services List",
            description: "List of services with descriptions",
            icon: "List",
            schema: Schema::new()
                .optional("title", FieldKind::Text)
                .optional("subtitle", FieldKind::Text)
                .optional("ctaText", FieldKind::Text)
                .optional("ctaButtonText", FieldKind::Text)
                .optional("ctaLink", FieldKind::Url)
                .optional("layout", FieldKind::choice(&["grid", "list"]))
                .optional("columns", FieldKind::Number)
                .field(
                    "services",
                    FieldKind::list(FieldKind::Object(
                        Schema::new()
                            .field("title", FieldKind::Text)
                            .field("description", FieldKind::Text)
                            .optional("icon", FieldKind::Text)
                            .optional("features", FieldKind::list(FieldKind::Text))
                            .optional("buttonText", FieldKind::Text)
                            .optional("link", FieldKind::Url)
                            .optional("featured", FieldKind::Bool),
                    )),
                ),
            default_properties: props(json!({
                "title": "Our Services",
                "subtitle": "Discover how we can help transform your business",
                "layout": "grid",
                "columns": 3,
                "services": [
                    { "title": "Service 1", "description": "Description of service 1", "icon": "Briefcase" },
                    { "title": "Service 2", "description": "Description of service 2", "icon": "Code" },
                    { "title": "Service 3", "description": "Description of service 3", "icon": "PenTool" },
                ],
            })),
            render: templates::services_list,
        },
        CatalogEntry {
            type_tag: "content",
            display_name: "Content Block",
            description: "Text content with optional image",
            icon: "FileText",
            schema: Schema::new()
                .field("text", FieldKind::Text)
                .optional("image", FieldKind::Url),
            default_properties: props(json!({
                "text": "Add your content here. This is a paragraph of text that can be edited.",
                "image": "/abstract-digital-pattern.png",
            })),
            render: templates::content_block,
        },
        CatalogEntry {
            type_tag: "slide-viewer",
            display_name: "Slide Viewer",
            description: "Interactive slide presentation viewer",
            icon: "Presentation",
            schema: Schema::new()
                .optional("title", FieldKind::Text)
                .optional("backgroundColor", FieldKind::Text)
                .optional("autoplay", FieldKind::Bool)
                .optional("navigation", FieldKind::Bool)
                .optional("pagination", FieldKind::Bool)
                .field(
                    "slides",
                    FieldKind::list(FieldKind::Object(
                        Schema::new()
                            .field("url", FieldKind::Url)
                            .field("alt", FieldKind::Text),
                    )),
                ),
            default_properties: props(json!({
                "title": "Our Vision in Action",
                "backgroundColor": "bg-muted",
                "autoplay": false,
                "navigation": true,
                "pagination": true,
                "slides": [
                    { "url": "/presentation-slide-1.png", "alt": "Slide 1" },
                    { "url": "/presentation-slide-2.png", "alt": "Slide 2" },
                    { "url": "/presentation-slide-3.png", "alt": "Slide 3" },
                ],
            })),
            render: templates::slide_viewer,
        },
        CatalogEntry {
            type_tag: "video-player",
            display_name: "Video Player",
            description: "Embed and play video content",
            icon: "Video",
            schema: Schema::new()
                .optional("title", FieldKind::Text)
                .field("videoUrl", FieldKind::Url)
                .optional("thumbnailUrl", FieldKind::Url)
                .optional("autoplay", FieldKind::Bool)
                .optional("controls", FieldKind::Bool)
                .optional("loop", FieldKind::Bool)
                .optional("muted", FieldKind::Bool),
            default_properties: props(json!({
                "title": "Video Player",
                "videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "thumbnailUrl": "/video-thumbnail.png",
                "autoplay": false,
                "controls": true,
                "loop": false,
                "muted": false,
            })),
            render: templates::video_player,
        },
        CatalogEntry {
            type_tag: "calendar",
            display_name: "Event Calendar",
            description: "Interactive calendar with events",
            icon: "Calendar",
            schema: Schema::new()
                .optional("title", FieldKind::Text)
                .field(
                    "events",
                    FieldKind::list(FieldKind::Object(
                        Schema::new()
                            .field("id", FieldKind::Text)
                            .field("title", FieldKind::Text)
                            .field("date", FieldKind::Text)
                            .optional("description", FieldKind::Text)
                            .optional("location", FieldKind::Text)
                            .optional("url", FieldKind::Url),
                    )),
                )
                .optional("viewType", FieldKind::choice(&["month", "week", "day"])),
            default_properties: props(json!({
                "title": "Event Calendar",
                "events": [
                    { "id": "1", "title": "Team Meeting", "date": "1970-01-02T00:00:00Z", "description": "Weekly team sync" },
                    { "id": "2", "title": "Product Launch", "date": "1970-01-08T00:00:00Z", "description": "New product release" },
                ],
                "viewType": "month",
            })),
            render: templates::calendar,
        },
        CatalogEntry {
            type_tag: "email-form",
            display_name: "Email Form",
            description: "Contact form that sends emails directly",
            icon: "Mail",
            schema: Schema::new()
                .optional("title", FieldKind::Text)
                .field("recipientEmail", FieldKind::Email)
                .optional("subjectPrefix", FieldKind::Text)
                .optional("submitButtonText", FieldKind::Text)
                .optional("successMessage", FieldKind::Text)
                .field(
                    "fields",
                    FieldKind::list(FieldKind::Object(
                        Schema::new()
                            .field("name", FieldKind::Text)
                            .field("label", FieldKind::Text)
                            .field(
                                "type",
                                FieldKind::choice(&["text", "email", "textarea", "select", "checkbox"]),
                            )
                            .optional("required", FieldKind::Bool)
                            .optional("options", FieldKind::list(FieldKind::Text)),
                    )),
                ),
            default_properties: props(json!({
                "title": "Contact via Email",
                "recipientEmail": "contact@example.com",
                "subjectPrefix": "[Website Inquiry]",
                "submitButtonText": "Send Email",
                "successMessage": "Your email has been sent successfully!",
                "fields": [
                    { "name": "name", "label": "Your Name", "type": "text", "required": true },
                    { "name": "email", "label": "Your Email", "type": "email", "required": true },
                    { "name": "message", "label": "Message", "type": "textarea", "required": true },
                ],
            })),
            render: templates::email_form,
        },
        CatalogEntry {
            type_tag: "chat-interface",
            display_name: "Chat Interface",
            description: "Live chat interface for customer support",
            icon: "MessageSquare",
            schema: Schema::new()
                .optional("title", FieldKind::Text)
                .field("welcomeMessage", FieldKind::Text)
                .optional("agentName", FieldKind::Text)
                .optional("agentAvatar", FieldKind::Url)
                .optional("showTimestamp", FieldKind::Bool),
            default_properties: props(json!({
                "title": "Live Chat",
                "welcomeMessage": "Hello! How can we help you today?",
                "agentName": "Support Team",
                "agentAvatar": "/support-avatar.png",
                "showTimestamp": true,
            })),
            render: templates::chat_interface,
        },
        CatalogEntry {
            type_tag: "call-to-action",
            display_name: "Call to Action",
            description: "Prominent section to encourage user action",
            icon: "Zap",
            schema: Schema::new()
                .field("title", FieldKind::Text)
                .optional("description", FieldKind::Text)
                .field("primaryButtonText", FieldKind::Text)
                .field("primaryButtonLink", FieldKind::Url)
                .optional("secondaryButtonText", FieldKind::Text)
                .optional("secondaryButtonLink", FieldKind::Url)
                .optional("backgroundColor", FieldKind::Text),
            default_properties: props(json!({
                "title": "Ready to Get Started?",
                "description": "Join thousands of satisfied customers using our platform.",
                "primaryButtonText": "Sign Up Now",
                "primaryButtonLink": "/signup",
                "secondaryButtonText": "Learn More",
                "secondaryButtonLink": "/about",
                "backgroundColor": "bg-primary",
            })),
            render: templates::call_to_action,
        },
        CatalogEntry {
            type_tag: "pricing-table",
            display_name: "Pricing Table",
            description: "Display pricing tiers and features",
            icon: "DollarSign",
            schema: Schema::new()
                .optional("title", FieldKind::Text)
                .optional("description", FieldKind::Text)
                .field(
                    "plans",
                    FieldKind::list(FieldKind::Object(
                        Schema::new()
                            .field("name", FieldKind::Text)
                            .field("price", FieldKind::Text)
                            .optional("period", FieldKind::Text)
                            .optional("description", FieldKind::Text)
                            .field("features", FieldKind::list(FieldKind::Text))
                            .optional("buttonText", FieldKind::Text)
                            .optional("buttonLink", FieldKind::Url)
                            .optional("highlighted", FieldKind::Bool),
                    )),
                ),
            default_properties: props(json!({
                "title": "Choose Your Plan",
                "description": "Select the perfect plan for your needs",
                "plans": [
                    {
                        "name": "Basic",
                        "price": "$9.99",
                        "period": "monthly",
                        "description": "Perfect for individuals",
                        "features": ["Feature 1", "Feature 2", "Feature 3"],
                        "buttonText": "Get Started",
                        "buttonLink": "/signup?plan=basic",
                        "highlighted": false,
                    },
                    {
                        "name": "Pro",
                        "price": "$19.99",
                        "period": "monthly",
                        "description": "Ideal for small teams",
                        "features": ["Feature 1", "Feature 2", "Feature 3", "Feature 4", "Feature 5"],
                        "buttonText": "Get Started",
                        "buttonLink": "/signup?plan=pro",
                        "highlighted": true,
                    },
                ],
            })),
            render: templates::pricing_table,
        },
    ]
}

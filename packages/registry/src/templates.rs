//! Render functions for the built-in component types.
//!
//! Each function turns a property map into a vdom subtree. Missing or
//! mistyped properties degrade to empty strings or empty lists rather than
//! failing; documents written by older catalogs stay renderable.

use crate::render::RenderOptions;
use serde_json::Value;
use sitewright_store::PropertyMap;
use sitewright_vdom::VNode;

fn text_prop<'a>(props: &'a PropertyMap, key: &str) -> &'a str {
    props.get(key).and_then(Value::as_str).unwrap_or("")
}

fn bool_prop(props: &PropertyMap, key: &str) -> bool {
    props.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn list_prop<'a>(props: &'a PropertyMap, key: &str) -> &'a [Value] {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn obj_str<'a>(item: &'a Value, key: &str) -> &'a str {
    item.get(key).and_then(Value::as_str).unwrap_or("")
}

fn heading(level: &str, content: &str) -> VNode {
    VNode::element(level).with_child(VNode::text(content))
}

fn link_button(class: &str, href: &str, label: &str) -> VNode {
    VNode::element("a")
        .with_class(class)
        .with_attr("href", href)
        .with_child(VNode::text(label))
}

fn img(src: &str, alt: &str) -> VNode {
    VNode::element("img")
        .with_attr("src", src)
        .with_attr("alt", alt)
}

pub(crate) fn hero_section(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let mut section = VNode::element("section").with_class("sw-hero");

    let pattern = text_prop(props, "backgroundPattern");
    if !pattern.is_empty() {
        section = section.with_style("background-image", format!("url({})", pattern));
    }

    section
        .with_child(heading("h1", text_prop(props, "title")))
        .with_child(
            VNode::element("p")
                .with_class("sw-hero-subtitle")
                .with_child(VNode::text(text_prop(props, "subtitle"))),
        )
        .with_child(link_button(
            "sw-button sw-button-primary",
            text_prop(props, "buttonLink"),
            text_prop(props, "buttonText"),
        ))
}

pub(crate) fn header(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let alignment = match text_prop(props, "alignment") {
        "" => "center",
        other => other,
    };
    let size = match text_prop(props, "size") {
        "" => "medium",
        other => other,
    };

    let mut node = VNode::element("header")
        .with_class(format!("sw-header sw-header-{}", size))
        .with_style("text-align", alignment)
        .with_child(heading("h2", text_prop(props, "title")));

    let subtitle = text_prop(props, "subtitle");
    if !subtitle.is_empty() {
        node = node.with_child(VNode::element("p").with_child(VNode::text(subtitle)));
    }
    node
}

pub(crate) fn feature_section(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let mut class = "sw-feature".to_string();
    if bool_prop(props, "reversed") {
        class.push_str(" sw-feature-reversed");
    }

    let mut body = VNode::element("div")
        .with_class("sw-feature-body")
        .with_child(heading("h2", text_prop(props, "title")))
        .with_child(VNode::element("p").with_child(VNode::text(text_prop(props, "description"))));

    let button_text = text_prop(props, "buttonText");
    if !button_text.is_empty() {
        body = body.with_child(link_button(
            "sw-button",
            text_prop(props, "buttonLink"),
            button_text,
        ));
    }

    for link in list_prop(props, "links") {
        body = body.with_child(link_button(
            "sw-feature-link",
            obj_str(link, "href"),
            obj_str(link, "text"),
        ));
    }

    let mut section = VNode::element("section").with_class(class);
    let image = text_prop(props, "image");
    if !image.is_empty() {
        section = section.with_child(
            VNode::element("div")
                .with_class("sw-feature-media")
                .with_child(img(image, text_prop(props, "imageAlt"))),
        );
    }
    section.with_child(body)
}

pub(crate) fn team_showcase(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let columns = props
        .get("columns")
        .and_then(Value::as_u64)
        .unwrap_or(3)
        .to_string();

    let mut grid = VNode::element("div")
        .with_class("sw-team-grid")
        .with_attr("data-columns", columns);

    for member in list_prop(props, "members") {
        let role = match obj_str(member, "role") {
            "" => obj_str(member, "title"),
            role => role,
        };
        let bio = match obj_str(member, "bio") {
            "" => member
                .get("biography")
                .and_then(Value::as_array)
                .and_then(|lines| lines.first())
                .and_then(Value::as_str)
                .unwrap_or(""),
            bio => bio,
        };

        let mut card = VNode::element("article")
            .with_class("sw-team-member")
            .with_attr("data-slug", obj_str(member, "slug"));

        let image = obj_str(member, "image");
        if !image.is_empty() {
            card = card.with_child(img(image, obj_str(member, "name")));
        }
        card = card
            .with_child(heading("h3", obj_str(member, "name")))
            .with_child(
                VNode::element("p")
                    .with_class("sw-team-role")
                    .with_child(VNode::text(role)),
            );
        if !bio.is_empty() {
            card = card.with_child(VNode::element("p").with_child(VNode::text(bio)));
        }
        grid = grid.with_child(card);
    }

    VNode::element("section")
        .with_class("sw-team")
        .with_child(heading("h2", text_prop(props, "title")))
        .with_child(grid)
}

pub(crate) fn services_list(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let mut list = VNode::element("div").with_class("sw-services-grid");

    for service in list_prop(props, "services") {
        let mut card = VNode::element("article").with_class(if service
            .get("featured")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            "sw-service sw-service-featured"
        } else {
            "sw-service"
        });

        card = card
            .with_child(heading("h3", obj_str(service, "title")))
            .with_child(VNode::element("p").with_child(VNode::text(obj_str(service, "description"))));

        let features: Vec<VNode> = service
            .get("features")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|f| VNode::element("li").with_child(VNode::text(f)))
                    .collect()
            })
            .unwrap_or_default();
        if !features.is_empty() {
            card = card.with_child(VNode::element("ul").with_children(features));
        }

        let button_text = obj_str(service, "buttonText");
        if !button_text.is_empty() {
            card = card.with_child(link_button("sw-button", obj_str(service, "link"), button_text));
        }
        list = list.with_child(card);
    }

    let mut section = VNode::element("section").with_class("sw-services");
    let title = text_prop(props, "title");
    if !title.is_empty() {
        section = section.with_child(heading("h2", title));
    }
    let subtitle = text_prop(props, "subtitle");
    if !subtitle.is_empty() {
        section = section.with_child(VNode::element("p").with_child(VNode::text(subtitle)));
    }
    section = section.with_child(list);

    let cta_button = match text_prop(props, "ctaButtonText") {
        "" => text_prop(props, "ctaText"),
        label => label,
    };
    if !cta_button.is_empty() {
        section = section.with_child(link_button(
            "sw-button sw-button-primary",
            text_prop(props, "ctaLink"),
            cta_button,
        ));
    }
    section
}

pub(crate) fn content_block(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let mut section = VNode::element("section").with_class("sw-content");

    let image = text_prop(props, "image");
    if !image.is_empty() {
        section = section.with_child(img(image, ""));
    }
    section.with_child(VNode::element("p").with_child(VNode::text(text_prop(props, "text"))))
}

pub(crate) fn slide_viewer(props: &PropertyMap, options: &RenderOptions) -> VNode {
    // Autoplay is forced off while editing so the preview stays still.
    let autoplay = bool_prop(props, "autoplay") && !options.edit_mode;

    let mut viewer = VNode::element("div")
        .with_class("sw-slides")
        .with_attr("data-autoplay", autoplay.to_string())
        .with_attr("data-navigation", bool_prop(props, "navigation").to_string())
        .with_attr("data-pagination", bool_prop(props, "pagination").to_string());

    for slide in list_prop(props, "slides") {
        viewer = viewer.with_child(
            VNode::element("div")
                .with_class("sw-slide")
                .with_child(img(obj_str(slide, "url"), obj_str(slide, "alt"))),
        );
    }

    let mut section = VNode::element("section").with_class("sw-slide-viewer");
    let background = text_prop(props, "backgroundColor");
    if !background.is_empty() {
        section = section.with_class(format!("sw-slide-viewer {}", background));
    }
    let title = text_prop(props, "title");
    if !title.is_empty() {
        section = section.with_child(heading("h2", title));
    }
    section.with_child(viewer)
}

pub(crate) fn video_player(props: &PropertyMap, options: &RenderOptions) -> VNode {
    let autoplay = bool_prop(props, "autoplay") && !options.edit_mode;

    let mut video = VNode::element("video")
        .with_attr("src", text_prop(props, "videoUrl"))
        .with_attr("preload", "metadata");

    let thumbnail = text_prop(props, "thumbnailUrl");
    if !thumbnail.is_empty() {
        video = video.with_attr("poster", thumbnail);
    }
    if autoplay {
        video = video.with_attr("autoplay", "autoplay");
    }
    if bool_prop(props, "controls") {
        video = video.with_attr("controls", "controls");
    }
    if bool_prop(props, "loop") {
        video = video.with_attr("loop", "loop");
    }
    if bool_prop(props, "muted") {
        video = video.with_attr("muted", "muted");
    }

    let mut section = VNode::element("section").with_class("sw-video");
    let title = text_prop(props, "title");
    if !title.is_empty() {
        section = section.with_child(heading("h2", title));
    }
    section.with_child(video)
}

pub(crate) fn calendar(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let view = match text_prop(props, "viewType") {
        "" => "month",
        view => view,
    };

    let mut list = VNode::element("ul").with_class("sw-calendar-events");
    for event in list_prop(props, "events") {
        let mut item = VNode::element("li")
            .with_attr("data-event-id", obj_str(event, "id"))
            .with_child(
                VNode::element("time")
                    .with_attr("datetime", obj_str(event, "date"))
                    .with_child(VNode::text(obj_str(event, "date"))),
            )
            .with_child(heading("h3", obj_str(event, "title")));

        let description = obj_str(event, "description");
        if !description.is_empty() {
            item = item.with_child(VNode::element("p").with_child(VNode::text(description)));
        }
        let location = obj_str(event, "location");
        if !location.is_empty() {
            item = item.with_child(
                VNode::element("p")
                    .with_class("sw-calendar-location")
                    .with_child(VNode::text(location)),
            );
        }
        list = list.with_child(item);
    }

    VNode::element("section")
        .with_class("sw-calendar")
        .with_attr("data-view", view)
        .with_child(heading("h2", text_prop(props, "title")))
        .with_child(list)
}

pub(crate) fn email_form(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let mut form = VNode::element("form")
        .with_class("sw-email-form")
        .with_attr("data-recipient", text_prop(props, "recipientEmail"))
        .with_attr("data-subject-prefix", text_prop(props, "subjectPrefix"));

    for field in list_prop(props, "fields") {
        let name = obj_str(field, "name");
        let field_type = match obj_str(field, "type") {
            "" => "text",
            t => t,
        };
        let required = field
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let mut input = match field_type {
            "textarea" => VNode::element("textarea").with_attr("name", name),
            "select" => {
                let options: Vec<VNode> = field
                    .get("options")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(|o| {
                                VNode::element("option")
                                    .with_attr("value", o)
                                    .with_child(VNode::text(o))
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                VNode::element("select")
                    .with_attr("name", name)
                    .with_children(options)
            }
            other => VNode::element("input")
                .with_attr("type", other)
                .with_attr("name", name),
        };
        if required {
            input = input.with_attr("required", "required");
        }

        form = form.with_child(
            VNode::element("label")
                .with_child(VNode::text(obj_str(field, "label")))
                .with_child(input),
        );
    }

    let submit_label = match text_prop(props, "submitButtonText") {
        "" => "Send Email",
        label => label,
    };
    form = form.with_child(
        VNode::element("button")
            .with_attr("type", "submit")
            .with_child(VNode::text(submit_label)),
    );

    VNode::element("section")
        .with_class("sw-email")
        .with_child(heading("h2", text_prop(props, "title")))
        .with_child(form)
}

pub(crate) fn chat_interface(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let mut welcome = VNode::element("div").with_class("sw-chat-message sw-chat-agent");

    let avatar = text_prop(props, "agentAvatar");
    if !avatar.is_empty() {
        welcome = welcome.with_child(img(avatar, text_prop(props, "agentName")));
    }
    welcome = welcome
        .with_child(
            VNode::element("span")
                .with_class("sw-chat-agent-name")
                .with_child(VNode::text(text_prop(props, "agentName"))),
        )
        .with_child(VNode::element("p").with_child(VNode::text(text_prop(props, "welcomeMessage"))));

    VNode::element("section")
        .with_class("sw-chat")
        .with_attr(
            "data-show-timestamp",
            bool_prop(props, "showTimestamp").to_string(),
        )
        .with_child(heading("h2", text_prop(props, "title")))
        .with_child(welcome)
        .with_child(
            VNode::element("input")
                .with_attr("type", "text")
                .with_attr("placeholder", "Type a message..."),
        )
}

pub(crate) fn call_to_action(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let mut section = VNode::element("section").with_class("sw-cta");

    let background = text_prop(props, "backgroundColor");
    if !background.is_empty() {
        section = section.with_class(format!("sw-cta {}", background));
    }

    section = section.with_child(heading("h2", text_prop(props, "title")));
    let description = text_prop(props, "description");
    if !description.is_empty() {
        section = section.with_child(VNode::element("p").with_child(VNode::text(description)));
    }
    section = section.with_child(link_button(
        "sw-button sw-button-primary",
        text_prop(props, "primaryButtonLink"),
        text_prop(props, "primaryButtonText"),
    ));

    let secondary = text_prop(props, "secondaryButtonText");
    if !secondary.is_empty() {
        section = section.with_child(link_button(
            "sw-button sw-button-secondary",
            text_prop(props, "secondaryButtonLink"),
            secondary,
        ));
    }
    section
}

pub(crate) fn pricing_table(props: &PropertyMap, _options: &RenderOptions) -> VNode {
    let mut grid = VNode::element("div").with_class("sw-pricing-grid");

    for plan in list_prop(props, "plans") {
        let highlighted = plan
            .get("highlighted")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let mut card = VNode::element("article").with_class(if highlighted {
            "sw-plan sw-plan-highlighted"
        } else {
            "sw-plan"
        });

        card = card.with_child(heading("h3", obj_str(plan, "name"))).with_child(
            VNode::element("p")
                .with_class("sw-plan-price")
                .with_child(VNode::text(obj_str(plan, "price")))
                .with_child(
                    VNode::element("span")
                        .with_class("sw-plan-period")
                        .with_child(VNode::text(obj_str(plan, "period"))),
                ),
        );

        let description = obj_str(plan, "description");
        if !description.is_empty() {
            card = card.with_child(VNode::element("p").with_child(VNode::text(description)));
        }

        let features: Vec<VNode> = plan
            .get("features")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|f| VNode::element("li").with_child(VNode::text(f)))
                    .collect()
            })
            .unwrap_or_default();
        card = card.with_child(VNode::element("ul").with_children(features));

        let button_text = obj_str(plan, "buttonText");
        if !button_text.is_empty() {
            card = card.with_child(link_button(
                "sw-button",
                obj_str(plan, "buttonLink"),
                button_text,
            ));
        }
        grid = grid.with_child(card);
    }

    let mut section = VNode::element("section")
        .with_class("sw-pricing")
        .with_child(heading("h2", text_prop(props, "title")));
    let description = text_prop(props, "description");
    if !description.is_empty() {
        section = section.with_child(VNode::element("p").with_child(VNode::text(description)));
    }
    section.with_child(grid)
}

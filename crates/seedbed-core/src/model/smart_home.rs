//! Built-in smart-home catalogue
//!
//! Used for any smart-home collection the fixture document leaves out.

use serde_json::{json, Value};

use super::fixture::Fields;

fn records(value: Value) -> Vec<Fields> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(fields),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub fn faqs() -> Vec<Fields> {
    records(json!([
        {
            "question": "Do I need to already own smart devices?",
            "answer": "No! Our plans are designed for everyone, whether you're starting from scratch or already have some smart devices. We'll recommend products that work together seamlessly and fit your specific needs and budget.",
            "order": 1,
            "category": "general"
        },
        {
            "question": "Can I customize the plan after I get it?",
            "answer": "Absolutely! Your plan is a starting point tailored to your survey responses. You can adjust it based on your preferences, budget, or as your needs change. We provide flexible recommendations that you can mix and match.",
            "order": 2,
            "category": "general"
        },
        {
            "question": "Will this work with Alexa or Google Home?",
            "answer": "Yes! We recommend products that are compatible with major smart home ecosystems including Amazon Alexa, Google Home, and Apple HomeKit. Your plan will specify which devices work with which platforms.",
            "order": 3,
            "category": "technical"
        },
        {
            "question": "What if I live in an apartment?",
            "answer": "Perfect! Many of our solutions are renter-friendly and don't require permanent installation. We focus on plug-and-play devices, smart bulbs, and portable sensors that you can take with you when you move.",
            "order": 4,
            "category": "general"
        }
    ]))
}

pub fn features() -> Vec<Fields> {
    records(json!([
        {
            "title": "Personalized to You",
            "description": "Plans tailored to your rooms, routines, and style, no cookie-cutter setups.",
            "order": 1
        },
        {
            "title": "Smart, Thoughtful Solutions",
            "description": "Ideas you haven't thought of, solving real-life needs and elevating your space.",
            "order": 2
        },
        {
            "title": "The Perfect Products",
            "description": "Curated picks that work beautifully together, with ready-to-buy links so you can move forward without the guesswork.",
            "order": 3
        },
        {
            "title": "Guidance Made Easy",
            "description": "Clear steps that turn your plan into reality, without the stress or guesswork.",
            "order": 4
        }
    ]))
}

pub fn possibilities() -> Vec<Fields> {
    records(json!([
        {
            "title": "Light Your Path at Night",
            "description": "Motion-activated lighting for safe, effortless trips in the dark.",
            "category": "lighting",
            "order": 1
        },
        {
            "title": "Keep the Peace at Bedtime",
            "description": "Warm, focused lighting that lets you read without disturbing your partner.",
            "category": "lighting",
            "order": 2
        },
        {
            "title": "Keep Control Within Reach",
            "description": "Optimally placed buttons for instant lighting and mood control.",
            "category": "convenience",
            "order": 3
        },
        {
            "title": "Save Energy Effortlessly",
            "description": "Lights that switch off automatically when they're not needed.",
            "category": "energy",
            "order": 4
        },
        {
            "title": "Keep Home Safe While You're Away",
            "description": "Smart security features that give you peace of mind when you're not home.",
            "category": "security",
            "order": 5
        }
    ]))
}

pub fn work_steps() -> Vec<Fields> {
    records(json!([
        {
            "title": "Tell Us About Your Space",
            "description": "Quick lifestyle survey.",
            "stepNumber": 1
        },
        {
            "title": "Get Your Perfect Plan",
            "description": "See solutions made for you.",
            "stepNumber": 2
        },
        {
            "title": "Make It Real",
            "description": "Buy the right products and follow easy steps.",
            "stepNumber": 3
        }
    ]))
}

pub fn products() -> Vec<Fields> {
    records(json!([
        {
            "name": "Philips Hue White and Color Ambiance Starter Kit",
            "description": "Complete smart lighting starter kit with hub and color-changing bulbs. Perfect for creating custom lighting scenes and automations.",
            "price": 199.99,
            "category": "lighting",
            "brand": "Philips",
            "rating": 4.7,
            "affiliateLink": "https://amazon.com/philips-hue-starter-kit"
        },
        {
            "name": "Aqara Motion Sensor",
            "description": "Compact motion sensor with 170° detection angle. Battery-powered and easy to install anywhere.",
            "price": 19.99,
            "category": "sensors",
            "brand": "Aqara",
            "rating": 4.5,
            "affiliateLink": "https://amazon.com/aqara-motion-sensor"
        },
        {
            "name": "Samsung SmartThings Hub",
            "description": "Central hub that connects and controls all your smart home devices in one place.",
            "price": 89.99,
            "category": "hubs",
            "brand": "Samsung",
            "rating": 4.4,
            "affiliateLink": "https://amazon.com/smartthings-hub"
        },
        {
            "name": "LIFX Smart Bulb",
            "description": "No hub required! WiFi-enabled color-changing smart bulb with 16 million colors.",
            "price": 44.99,
            "category": "lighting",
            "brand": "LIFX",
            "rating": 4.6,
            "affiliateLink": "https://amazon.com/lifx-smart-bulb"
        }
    ]))
}

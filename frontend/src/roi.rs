use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Weeks per month used by the estimate.
const WEEKS_PER_MONTH: f64 = 4.3;
/// Monthly price of the automation plan the savings are compared against.
const PLAN_PRICE: f64 = 497.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiInputs {
    pub hours_per_week: u32,
    pub hourly_rate: u32,
    pub headcount: u32,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            hours_per_week: 10,
            hourly_rate: 25,
            headcount: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoiEstimate {
    /// Euros saved per month.
    pub monthly: u64,
    /// Yearly savings over the yearly plan price.
    pub ratio: u64,
}

impl RoiEstimate {
    pub fn monthly_label(&self) -> String {
        format!("{}€", format_es(self.monthly))
    }

    pub fn ratio_label(&self) -> String {
        format!("{}×", self.ratio)
    }
}

pub fn estimate(inputs: RoiInputs) -> RoiEstimate {
    let monthly = (inputs.hours_per_week as f64
        * WEEKS_PER_MONTH
        * inputs.hourly_rate as f64
        * inputs.headcount as f64)
        .round();
    let ratio = (monthly * 12.0 / PLAN_PRICE).round();
    RoiEstimate {
        monthly: monthly as u64,
        ratio: ratio as u64,
    }
}

/// Spanish digit grouping: `.` every three digits, but only from five digits up.
pub fn format_es(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() < 5 {
        return digits;
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[derive(Clone, Copy)]
enum Field {
    Hours,
    Rate,
    Headcount,
}

#[function_component(RoiCalculator)]
pub fn roi_calculator() -> Html {
    let inputs = use_state(RoiInputs::default);
    let result = estimate(*inputs);

    let on_input = |field: Field| {
        let inputs = inputs.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Ok(value) = input.value().parse::<u32>() else { return };
            let mut next = *inputs;
            match field {
                Field::Hours => next.hours_per_week = value,
                Field::Rate => next.hourly_rate = value,
                Field::Headcount => next.headcount = value,
            }
            inputs.set(next);
        })
    };

    html! {
        <div class="roi-calculator reveal">
            <h3>{"Calcula tu ahorro"}</h3>
            <label for="roi-hours">
                {"Horas semanales en tareas repetitivas: "}
                <strong id="hours-val">{inputs.hours_per_week.to_string()}</strong>
            </label>
            <input id="roi-hours" type="range" min="1" max="40"
                value={inputs.hours_per_week.to_string()} oninput={on_input(Field::Hours)} />
            <label for="roi-rate">
                {"Coste por hora (€): "}
                <strong id="rate-val">{inputs.hourly_rate.to_string()}</strong>
            </label>
            <input id="roi-rate" type="range" min="10" max="100"
                value={inputs.hourly_rate.to_string()} oninput={on_input(Field::Rate)} />
            <label for="roi-headcount">
                {"Personas implicadas: "}
                <strong id="hc-val">{inputs.headcount.to_string()}</strong>
            </label>
            <input id="roi-headcount" type="range" min="1" max="50"
                value={inputs.headcount.to_string()} oninput={on_input(Field::Headcount)} />
            <div class="roi-results">
                <div>
                    <span class="roi-label">{"Ahorro mensual"}</span>
                    <span id="roi-monthly" class="roi-value">{result.monthly_label()}</span>
                </div>
                <div>
                    <span class="roi-label">{"Retorno anual"}</span>
                    <span id="roi-ratio" class="roi-value">{result.ratio_label()}</span>
                </div>
            </div>
        </div>
    }
}
